//! The single dashboard page. Filters post to `/api/dashboard` and every
//! response redraws all seven output regions.

pub(crate) const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lab Management Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
    <style>
        body { margin: 0; background: #222; color: #e0e0e0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; }
        .layout { display: grid; grid-template-columns: 25% 75%; min-height: 100vh; }
        .sidebar { background: #303030; padding: 24px; }
        .sidebar h2 { color: #fff; text-align: center; margin: 16px 0 24px; }
        .sidebar p { text-align: center; }
        .sidebar label { display: block; margin-top: 16px; color: #fff; }
        .sidebar select { width: 100%; min-height: 120px; margin-top: 6px; color: #000; }
        .content { padding: 24px; }
        .kpis { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-bottom: 24px; }
        .kpi { text-align: center; font-size: 1.2em; }
        .charts { display: grid; grid-template-columns: repeat(2, 1fr); gap: 24px; }
        .chart { min-height: 420px; }
    </style>
</head>
<body>
<div class="layout">
    <aside class="sidebar">
        <h2>Lab Dashboard</h2>
        <hr>
        <p>Filters</p>
        <label for="researcher-filter">Researcher</label>
        <select id="researcher-filter" data-key="researchers" multiple></select>
        <label for="chemical-filter">Chemical</label>
        <select id="chemical-filter" data-key="chemicals" multiple></select>
        <label for="instrument-filter">Instrument</label>
        <select id="instrument-filter" data-key="instruments" multiple></select>
    </aside>
    <main class="content">
        <div class="kpis">
            <div id="total-cost" class="kpi"></div>
            <div id="unique-instruments" class="kpi"></div>
            <div id="busiest-day" class="kpi"></div>
        </div>
        <div class="charts">
            <div id="chemical-usage-bubble" class="chart"></div>
            <div id="cost-distribution-sunburst" class="chart"></div>
            <div id="instrument-usage-polar" class="chart"></div>
            <div id="daily-cost-line" class="chart"></div>
        </div>
    </main>
</div>
<script>
    const filters = ["researcher-filter", "chemical-filter", "instrument-filter"]
        .map((id) => document.getElementById(id));
    let latestRequest = 0;

    function fillOptions(select, values) {
        for (const value of values) {
            const option = document.createElement("option");
            option.value = value;
            option.textContent = value;
            select.appendChild(option);
        }
    }

    function selection() {
        const body = {};
        for (const select of filters) {
            const chosen = Array.from(select.selectedOptions, (option) => option.value);
            body[select.dataset.key] = chosen.length ? chosen : null;
        }
        return body;
    }

    async function refresh() {
        const requestId = ++latestRequest;
        const res = await fetch("/api/dashboard", {
            method: "POST",
            headers: { "content-type": "application/json" },
            body: JSON.stringify(selection()),
        });
        if (!res.ok) {
            console.error("dashboard update failed", res.status, await res.text());
            return;
        }
        const update = await res.json();
        if (requestId !== latestRequest) {
            return;
        }
        document.getElementById("total-cost").textContent = update.summaries.total_cost;
        document.getElementById("unique-instruments").textContent = update.summaries.unique_instruments;
        document.getElementById("busiest-day").textContent = update.summaries.busiest_day;
        for (const [id, figure] of Object.entries({
            "chemical-usage-bubble": update.figures.chemical_usage_bubble,
            "cost-distribution-sunburst": update.figures.cost_distribution_sunburst,
            "instrument-usage-polar": update.figures.instrument_usage_polar,
            "daily-cost-line": update.figures.daily_cost_line,
        })) {
            Plotly.react(id, figure.data, figure.layout, { responsive: true });
        }
    }

    async function init() {
        const res = await fetch("/api/filters");
        if (!res.ok) {
            console.error("filter options unavailable", res.status, await res.text());
            return;
        }
        const options = await res.json();
        fillOptions(filters[0], options.researchers);
        fillOptions(filters[1], options.chemicals);
        fillOptions(filters[2], options.instruments);
        for (const select of filters) {
            select.addEventListener("change", refresh);
        }
        await refresh();
    }

    init().catch((e) => console.error(e));
</script>
</body>
</html>
"##;
