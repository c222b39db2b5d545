use crate::dashboard::AutoUpdate;
use crate::models::{DashboardSnapshot, Product};

pub fn render_index(snapshot: &DashboardSnapshot, auto_update: AutoUpdate, product_count: usize) -> String {
    let (toggle_label, mode_label) = match auto_update {
        AutoUpdate::Enabled => ("Pause auto-update", "On"),
        AutoUpdate::Paused => ("Resume auto-update", "Paused"),
    };

    INDEX_HTML
        .replace("{{TIME}}", &escape_html(&snapshot.current_time))
        .replace("{{TOTAL}}", &snapshot.total_products().to_string())
        .replace("{{COUNT}}", &product_count.to_string())
        .replace("{{APPLE}}", &snapshot.apple_products.len().to_string())
        .replace("{{MODE}}", mode_label)
        .replace("{{TOGGLE}}", toggle_label)
        .replace("{{REFRESHED}}", &escape_html(snapshot.refreshed_at.as_deref().unwrap_or("never")))
        .replace("{{CATEGORY_ROWS}}", &category_rows(snapshot))
        .replace("{{APPLE_ITEMS}}", &apple_items(&snapshot.apple_products))
}

fn category_rows(snapshot: &DashboardSnapshot) -> String {
    if snapshot.category_counts.is_empty() {
        return r#"<li class="empty">No products yet</li>"#.to_string();
    }
    snapshot
        .category_counts
        .iter()
        .map(|(category, count)| {
            format!(
                r#"<li><span>{}</span><span class="count">{count}</span></li>"#,
                escape_html(category)
            )
        })
        .collect()
}

fn apple_items(products: &[Product]) -> String {
    if products.is_empty() {
        return r#"<li class="empty">No Apple products</li>"#.to_string();
    }
    products
        .iter()
        .map(|product| {
            let name = product.title().unwrap_or(&product.category);
            format!(
                r#"<li><span>{}</span><span class="count">{}</span></li>"#,
                escape_html(name),
                escape_html(&product.category)
            )
        })
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Product Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f6;
      --bg-2: #c9dbe6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3edf2 60%, #f4f7f9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .clock {
      font-size: 2.2rem;
      font-weight: 600;
      color: var(--accent-2);
      font-variant-numeric: tabular-nums;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat, .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.accent {
      color: var(--accent);
    }

    .lists {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    li {
      display: flex;
      justify-content: space-between;
      gap: 12px;
      padding: 8px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    li .count {
      font-weight: 600;
      color: var(--accent-2);
    }

    li.empty {
      color: #8b857d;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Product Dashboard</h1>
        <p class="subtitle">Last refreshed: <span id="refreshed">{{REFRESHED}}</span></p>
      </div>
      <span id="time" class="clock">{{TIME}}</span>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Products</span>
        <span id="total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Catalog size</span>
        <span id="count" class="value">{{COUNT}}</span>
      </div>
      <div class="stat">
        <span class="label">Apple products</span>
        <span id="apple" class="value accent">{{APPLE}}</span>
      </div>
      <div class="stat">
        <span class="label">Auto-update</span>
        <span id="mode" class="value">{{MODE}}</span>
      </div>
    </section>

    <form id="toggle-form" method="post" action="/auto-update/toggle">
      <button id="toggle-btn" type="submit">{{TOGGLE}}</button>
    </form>

    <section class="lists">
      <div class="card">
        <h2>By category</h2>
        <ul id="categories">{{CATEGORY_ROWS}}</ul>
      </div>
      <div class="card">
        <h2>Apple</h2>
        <ul id="apple-list">{{APPLE_ITEMS}}</ul>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Product data refreshes on the server every minute while auto-update is on.</p>
  </main>

  <script>
    const timeEl = document.getElementById('time');
    const refreshedEl = document.getElementById('refreshed');
    const totalEl = document.getElementById('total');
    const countEl = document.getElementById('count');
    const appleEl = document.getElementById('apple');
    const modeEl = document.getElementById('mode');
    const toggleBtn = document.getElementById('toggle-btn');
    const categoriesEl = document.getElementById('categories');
    const appleListEl = document.getElementById('apple-list');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const row = (label, value) => {
      const li = document.createElement('li');
      const left = document.createElement('span');
      const right = document.createElement('span');
      left.textContent = label;
      right.textContent = value;
      right.className = 'count';
      li.append(left, right);
      return li;
    };

    const emptyRow = (message) => {
      const li = document.createElement('li');
      li.className = 'empty';
      li.textContent = message;
      return li;
    };

    const renderMode = (mode) => {
      const enabled = mode === 'enabled';
      modeEl.textContent = enabled ? 'On' : 'Paused';
      toggleBtn.textContent = enabled ? 'Pause auto-update' : 'Resume auto-update';
    };

    const updateUI = (data) => {
      timeEl.textContent = data.current_time;
      refreshedEl.textContent = data.refreshed_at || 'never';
      totalEl.textContent = data.total_products;
      appleEl.textContent = data.apple_products.length;
      renderMode(data.auto_update);

      const categories = Object.entries(data.category_counts);
      categoriesEl.replaceChildren(
        ...(categories.length
          ? categories.map(([category, count]) => row(category, count))
          : [emptyRow('No products yet')])
      );
      appleListEl.replaceChildren(
        ...(data.apple_products.length
          ? data.apple_products.map((product) => row(product.title || product.category, product.category))
          : [emptyRow('No Apple products')])
      );
    };

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      updateUI(await res.json());
    };

    const loadCount = async () => {
      const res = await fetch('/api/products/count');
      if (!res.ok) {
        throw new Error('Unable to load product count');
      }
      const data = await res.json();
      countEl.textContent = data.total_products;
    };

    document.getElementById('toggle-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const res = await fetch('/api/auto-update/toggle', { method: 'POST' });
        if (!res.ok) {
          throw new Error('Toggle failed');
        }
        renderMode((await res.json()).auto_update);
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const poll = () => {
      loadDashboard()
        .then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));
    };

    loadCount().catch((err) => setStatus(err.message, 'error'));
    setInterval(poll, 5000);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counts_and_escapes_titles() {
        let mut product = Product::new("Phone", "Apple");
        product
            .extra
            .insert("title".to_string(), serde_json::json!("<b>iPhone</b>"));
        let snapshot = DashboardSnapshot {
            current_time: "12:00:00".to_string(),
            category_counts: [("Phone".to_string(), 1)].into_iter().collect(),
            apple_products: vec![product.clone()],
            products: vec![product],
            refreshed_at: None,
            revision: 1,
        };

        let html = render_index(&snapshot, AutoUpdate::Paused, 1);
        assert!(html.contains("12:00:00"));
        assert!(html.contains("&lt;b&gt;iPhone&lt;/b&gt;"));
        assert!(!html.contains("<b>iPhone</b>"));
        assert!(html.contains("Resume auto-update"));
        assert!(html.contains(">never<"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_snapshot_shows_placeholders() {
        let html = render_index(&DashboardSnapshot::default(), AutoUpdate::Enabled, 0);
        assert!(html.contains("No products yet"));
        assert!(html.contains("No Apple products"));
        assert!(html.contains("Pause auto-update"));
    }
}
