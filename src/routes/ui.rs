use axum::response::Html;

/// Serve the embedded single-page dashboard.
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>CVF / CDF Dashboard</title>
<style>
body { font-family: -apple-system, "Segoe UI", sans-serif; background: #0d1117; color: #c9d1d9; margin: 0; padding: 24px; }
h1 { font-size: 20px; margin: 0 0 16px; }
h2 { font-size: 15px; margin: 24px 0 8px; color: #8b949e; }
.controls { display: flex; gap: 12px; align-items: flex-start; flex-wrap: wrap; }
select[multiple] { min-width: 220px; min-height: 160px; background: #161b22; color: #c9d1d9; border: 1px solid #30363d; border-radius: 6px; padding: 6px; }
.hint { font-size: 12px; color: #8b949e; max-width: 320px; }
.prompt { margin: 32px 0; color: #8b949e; font-style: italic; }
.chart-box { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 12px; margin-bottom: 8px; }
.legend { font-size: 12px; margin: 4px 0 0; }
.legend span { margin-right: 14px; }
.skipped { font-size: 12px; color: #d29922; }
.error { color: #f85149; }
</style>
</head>
<body>
<h1>CVF and CDF Visualization</h1>
<div class="controls">
  <select id="assets" multiple size="10"></select>
  <div class="hint">Select assets to visualize. <b>Total</b> aggregates every
  trade across all assets. Hold Ctrl/Cmd to select several. Charts plot
  cumulative share against log<sub>10</sub>(trade volume).</div>
</div>
<div id="content"></div>
<script>
const COLORS = ['#58a6ff', '#3fb950', '#d29922', '#f85149', '#bc8cff', '#39c5cf', '#ff7b72', '#7ee787'];

async function fetchJson(url) {
  const res = await fetch(url);
  if (!res.ok) {
    const body = await res.json().catch(() => ({}));
    throw new Error(body.error || ('HTTP ' + res.status));
  }
  return res.json();
}

function selectedAssets() {
  return Array.from(document.getElementById('assets').selectedOptions).map(o => o.value);
}

function svgChart(series, width, height) {
  const pad = { l: 48, r: 12, t: 10, b: 28 };
  let xMin = Infinity, xMax = -Infinity;
  for (const s of series) for (const p of s.points) {
    if (p.log_volume < xMin) xMin = p.log_volume;
    if (p.log_volume > xMax) xMax = p.log_volume;
  }
  if (!isFinite(xMin)) { xMin = 0; xMax = 1; }
  if (xMax === xMin) xMax = xMin + 1;
  const sx = v => pad.l + (v - xMin) / (xMax - xMin) * (width - pad.l - pad.r);
  const sy = v => height - pad.b - v * (height - pad.t - pad.b);

  let out = '<svg width="' + width + '" height="' + height + '">';
  for (let i = 0; i <= 4; i++) {
    const y = sy(i / 4);
    out += '<line x1="' + pad.l + '" y1="' + y + '" x2="' + (width - pad.r) + '" y2="' + y + '" stroke="#21262d"/>';
    out += '<text x="' + (pad.l - 6) + '" y="' + (y + 4) + '" fill="#8b949e" font-size="10" text-anchor="end">' + (i * 25) + '%</text>';
  }
  for (let i = 0; i <= 5; i++) {
    const v = xMin + (xMax - xMin) * i / 5;
    const x = sx(v);
    out += '<text x="' + x + '" y="' + (height - 8) + '" fill="#8b949e" font-size="10" text-anchor="middle">' + v.toFixed(1) + '</text>';
  }
  series.forEach((s, i) => {
    const pts = s.points.map(p => sx(p.log_volume).toFixed(1) + ',' + sy(p.cumulative_percent).toFixed(1)).join(' ');
    out += '<polyline points="' + pts + '" fill="none" stroke="' + COLORS[i % COLORS.length] + '" stroke-width="1.5"/>';
  });
  out += '</svg>';
  return out;
}

function legend(series) {
  return '<p class="legend">' + series.map((s, i) =>
    '<span style="color:' + COLORS[i % COLORS.length] + '">&#9644; ' + s.scope + '</span>').join('') + '</p>';
}

async function redraw() {
  const content = document.getElementById('content');
  const selection = selectedAssets();
  if (selection.length === 0) {
    content.innerHTML = '<p class="prompt">Please select at least one asset.</p>';
    return;
  }
  try {
    const data = await fetchJson('/api/curves?scopes=' + encodeURIComponent(selection.join(',')));
    const cvf = data.scopes.map(s => ({ scope: s.scope, points: s.cvf }));
    const cdf = data.scopes.map(s => ({ scope: s.scope, points: s.cdf }));
    let html = '';
    if (data.skipped.length > 0) {
      html += '<p class="skipped">No data for: ' + data.skipped.join(', ') + '</p>';
    }
    html += '<h2>CVF for Selected Assets</h2><div class="chart-box">' + svgChart(cvf, 900, 320) + legend(cvf) + '</div>';
    html += '<h2>CDF for Selected Assets</h2><div class="chart-box">' + svgChart(cdf, 900, 320) + legend(cdf) + '</div>';
    content.innerHTML = html;
  } catch (e) {
    content.innerHTML = '<p class="error">Failed to load curves: ' + e.message + '</p>';
  }
}

async function init() {
  const sel = document.getElementById('assets');
  try {
    const data = await fetchJson('/api/assets');
    const defaults = new Set(data.default_selection);
    for (const asset of data.assets) {
      const opt = document.createElement('option');
      opt.value = asset;
      opt.textContent = asset;
      opt.selected = defaults.has(asset);
      sel.appendChild(opt);
    }
  } catch (e) {
    document.getElementById('content').innerHTML =
      '<p class="error">Failed to load assets: ' + e.message + '</p>';
    return;
  }
  sel.addEventListener('change', redraw);
  redraw();
}

init();
</script>
</body>
</html>
"##;
