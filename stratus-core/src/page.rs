//! Static dashboard page
//!
//! One unchanging HTML document served for every request that matches no
//! API route. Kept as three fixed text blocks — head/styles, body markup,
//! inline script — whose concatenated length is the declared
//! `Content-Length`. The script polls `/api/data` once a second, charts the
//! history window and posts the config form back as the positional JSON
//! document the codec expects.

/// Document head: charset, viewport, styles, chart library.
pub const HTML_HEADER: &str = "<!DOCTYPE html><html><head><meta charset='UTF-8'>\
<meta name='viewport' content='width=device-width, initial-scale=1.0'>\
<title>Stratus Station</title>\
<style>\
body{font-family:Arial,sans-serif;margin:0;padding:20px;background:#f5f5f5}\
.container{max-width:1100px;margin:0 auto}\
.card{background:#fff;padding:20px;margin:10px 0;border-radius:8px;box-shadow:0 2px 4px rgba(0,0,0,.1)}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:20px}\
.value{font-size:34px;font-weight:bold;margin:10px 0;text-align:center}\
.label{color:#666;text-align:center}\
.temp{color:#ff6b6b}.humid{color:#4ecdc4}.press{color:#45b7d1}\
.chart{height:200px;position:relative}\
.form{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:12px}\
.form label{display:block;margin-bottom:4px;color:#333}\
.form input{width:100%;padding:8px;border:1px solid #ddd;border-radius:4px;box-sizing:border-box}\
.btn{background:#4CAF50;color:#fff;padding:10px 20px;border:0;border-radius:4px;cursor:pointer;margin-top:12px}\
.alert{background:#ff6b6b;color:#fff;padding:10px;border-radius:4px;display:none}\
.alert.active{display:block}\
</style>\
<script src='https://cdn.jsdelivr.net/npm/chart.js'></script>\
</head><body>";

/// Body markup: live value cards, three chart canvases, config form.
pub const HTML_BODY: &str = "<div class='container'>\
<h1>Stratus Environmental Station</h1>\
<div id='alert' class='alert'></div>\
<div class='card'><h2>Current</h2><div class='grid'>\
<div><div class='label'>Temperature</div><div class='value temp' id='temp'>--</div><div class='label'>&deg;C</div></div>\
<div><div class='label'>Humidity</div><div class='value humid' id='humid'>--</div><div class='label'>%</div></div>\
<div><div class='label'>Pressure</div><div class='value press' id='press'>--</div><div class='label'>hPa</div></div>\
<div><div class='label'>Altitude</div><div class='value' id='alt'>--</div><div class='label'>m</div></div>\
</div></div>\
<div class='card'><h2>History</h2>\
<div class='chart'><canvas id='tempChart'></canvas></div>\
<div class='chart'><canvas id='humidChart'></canvas></div>\
<div class='chart'><canvas id='pressChart'></canvas></div>\
</div>\
<div class='card'><h2>Thresholds</h2><form id='configForm' class='form'>\
<div><label>Temp. min (&deg;C)</label><input type='number' id='temp_min' step='0.1'></div>\
<div><label>Temp. max (&deg;C)</label><input type='number' id='temp_max' step='0.1'></div>\
<div><label>Humidity min (%)</label><input type='number' id='humid_min' step='0.1'></div>\
<div><label>Humidity max (%)</label><input type='number' id='humid_max' step='0.1'></div>\
<div><label>Pressure min (hPa)</label><input type='number' id='press_min' step='0.1'></div>\
<div><label>Pressure max (hPa)</label><input type='number' id='press_max' step='0.1'></div>\
<div><label>Temp. offset (&deg;C)</label><input type='number' id='temp_offset' step='0.1'></div>\
<div><label>Humidity offset (%)</label><input type='number' id='humid_offset' step='0.1'></div>\
<div><label>Pressure offset (hPa)</label><input type='number' id='press_offset' step='0.1'></div>\
</form><button class='btn' onclick='saveConfig()'>Save</button></div>\
</div>";

/// Inline script: chart setup, one-second telemetry poll, config load/save.
pub const HTML_SCRIPT: &str = "<script>\
let charts={};let keys=['temp_min','temp_max','humid_min','humid_max','press_min','press_max','temp_offset','humid_offset','press_offset'];\
function mkChart(id,label,color){return new Chart(document.getElementById(id),{type:'line',data:{labels:[],datasets:[{label:label,data:[],borderColor:color,tension:0.1}]},options:{responsive:true,maintainAspectRatio:false,scales:{x:{display:false},y:{beginAtZero:false}},animation:{duration:0}}});}\
function initCharts(){charts.t=mkChart('tempChart','Temperature (\\u00b0C)','#ff6b6b');charts.h=mkChart('humidChart','Humidity (%)','#4ecdc4');charts.p=mkChart('pressChart','Pressure (hPa)','#45b7d1');}\
function setChart(c,data){c.data.labels=Array(data.length).fill('');c.data.datasets[0].data=data;c.update();}\
function updateData(){fetch('/api/data').then(r=>r.json()).then(d=>{\
document.getElementById('temp').textContent=d.temperature.toFixed(1);\
document.getElementById('humid').textContent=d.humidity.toFixed(1);\
document.getElementById('press').textContent=d.pressure.toFixed(1);\
document.getElementById('alt').textContent=d.altitude.toFixed(1);\
if(d.history){setChart(charts.t,d.history.temperature);setChart(charts.h,d.history.humidity);setChart(charts.p,d.history.pressure);}\
let a=document.getElementById('alert');\
if(d.alert){a.textContent=d.alert;a.classList.add('active');}else{a.classList.remove('active');}\
});}\
function loadConfig(){fetch('/api/config').then(r=>r.json()).then(d=>{keys.forEach(k=>{let e=document.getElementById(k);if(e)e.value=d[k];});});}\
function saveConfig(){let c={};keys.forEach(k=>{c[k]=parseFloat(document.getElementById(k).value);});\
fetch('/api/config',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify(c)}).then(()=>alert('Saved'));}\
window.onload=()=>{initCharts();loadConfig();updateData();setInterval(updateData,1000);};\
</script></body></html>";

/// Total page length, the value declared as `Content-Length`.
pub const fn page_len() -> usize {
    HTML_HEADER.len() + HTML_BODY.len() + HTML_SCRIPT.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_fits_the_response_buffer() {
        // Leave room for the status line and headers
        assert!(page_len() + 128 < crate::constants::RESPONSE_CAPACITY);
    }

    #[test]
    fn form_posts_every_config_key_in_wire_order() {
        // The script's key list drives the POST body; it must match the
        // codec's positional expectations.
        for key in crate::config::Config::KEYS {
            assert!(HTML_SCRIPT.contains(key), "script missing {key}");
            assert!(HTML_BODY.contains(key), "form missing {key}");
        }
    }
}
