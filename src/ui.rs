use crate::models::CounterRecord;

pub fn render_index(record: &CounterRecord) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &record.last_date.to_string())
        .replace("{{COUNT}}", &record.count.to_string())
        .replace("{{HISTORY}}", &render_history(record))
}

fn render_history(record: &CounterRecord) -> String {
    if record.history.is_empty() {
        return r#"<li class="empty">No history yet.</li>"#.to_string();
    }

    record
        .history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                r#"<li><span>{date}</span><strong>{count}</strong><button class="ghost" data-delete="{index}" title="Delete">&times;</button></li>"#,
                date = entry.date,
                count = entry.count,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Tally</title>
  <style>
    :root {
      --bg: #0b0d12;
      --panel: rgba(255, 255, 255, 0.06);
      --ink: #dbe4ee;
      --muted: #7f8fa6;
      --accent: #e0b84c;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1c2230, var(--bg) 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: flex;
      flex-direction: column;
    }

    nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 14px 24px;
      border-bottom: 1px solid var(--panel);
    }

    nav .brand {
      color: var(--accent);
      font-weight: 700;
    }

    button {
      font: inherit;
      color: var(--ink);
      background: var(--panel);
      border: 1px solid rgba(255, 255, 255, 0.12);
      border-radius: 10px;
      padding: 8px 14px;
      cursor: pointer;
    }

    button.ghost {
      background: transparent;
      border: none;
      color: var(--muted);
    }

    #tap {
      flex: 1;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      user-select: none;
      cursor: pointer;
    }

    #tap .label {
      color: var(--muted);
      letter-spacing: 2px;
      text-transform: uppercase;
    }

    #count {
      font-size: clamp(4rem, 15vw, 8rem);
      margin: 12px 0;
      font-variant-numeric: tabular-nums;
    }

    #history {
      margin: 0 auto 32px;
      width: min(480px, 92%);
      background: var(--panel);
      border-radius: 16px;
      padding: 16px 20px;
    }

    #history[hidden] {
      display: none;
    }

    #history ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    #history li {
      display: grid;
      grid-template-columns: 1fr auto auto;
      gap: 12px;
      align-items: center;
      padding: 8px 0;
      border-bottom: 1px solid rgba(255, 255, 255, 0.06);
    }

    #history li.empty {
      display: block;
      color: var(--muted);
      text-align: center;
    }

    #status {
      min-height: 1.2em;
      color: var(--muted);
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <nav>
    <span class="brand">Daily Tally</span>
    <div>
      <button id="reset-btn" type="button">Reset</button>
      <button id="history-btn" type="button">History</button>
    </div>
  </nav>

  <form id="tap" method="post" action="/tap">
    <span class="label">Daily count &middot; <span id="date">{{DATE}}</span></span>
    <div id="count">{{COUNT}}</div>
    <span id="status">Tap anywhere to increment</span>
  </form>

  <section id="history" hidden>
    <div style="display: flex; justify-content: space-between; align-items: center;">
      <h3>History</h3>
      <button id="clear-btn" type="button">Clear all</button>
    </div>
    <ul id="history-list">
        {{HISTORY}}
    </ul>
  </section>

  <script>
    const countEl = document.getElementById('count');
    const dateEl = document.getElementById('date');
    const statusEl = document.getElementById('status');
    const historySection = document.getElementById('history');
    const historyList = document.getElementById('history-list');

    const render = (record) => {
      countEl.textContent = record.count.toLocaleString();
      dateEl.textContent = record.lastDate;
      historyList.replaceChildren();
      if (record.history.length === 0) {
        const li = document.createElement('li');
        li.className = 'empty';
        li.textContent = 'No history yet.';
        historyList.appendChild(li);
        return;
      }
      record.history.forEach((entry, index) => {
        const li = document.createElement('li');
        const date = document.createElement('span');
        date.textContent = entry.date;
        const count = document.createElement('strong');
        count.textContent = entry.count.toLocaleString();
        const del = document.createElement('button');
        del.className = 'ghost';
        del.dataset.delete = String(index);
        del.title = 'Delete';
        del.innerHTML = '&times;';
        li.append(date, count, del);
        historyList.appendChild(li);
      });
    };

    const call = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      render(await res.json());
    };

    const report = (err) => {
      statusEl.textContent = err.message;
    };

    document.getElementById('tap').addEventListener('submit', (event) => event.preventDefault());
    document.getElementById('tap').addEventListener('click', () => {
      call('POST', '/api/increment').catch(report);
    });

    document.getElementById('reset-btn').addEventListener('click', () => {
      if (window.confirm("Are you sure you want to reset today's count to 0?")) {
        call('POST', '/api/reset').catch(report);
      }
    });

    document.getElementById('history-btn').addEventListener('click', () => {
      historySection.hidden = !historySection.hidden;
    });

    document.getElementById('clear-btn').addEventListener('click', () => {
      if (window.confirm('Delete all history?')) {
        call('DELETE', '/api/history').catch(report);
      }
    });

    historyList.addEventListener('click', (event) => {
      const index = event.target.dataset.delete;
      if (index !== undefined && window.confirm('Delete this entry?')) {
        call('DELETE', `/api/history/${index}`).catch(report);
      }
    });

    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape') {
        historySection.hidden = true;
      }
    });
  </script>
</body>
</html>
"#;
