use crate::server::api;
use crate::server::static_files;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(method, path) {
        return response;
    }
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path) if method == "GET" && path.starts_with("/api/ingredients") => {
            match api::ingredients_payload(path) {
                Ok(payload) => json_ok(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("GET", "/api/data/version") => match api::data_version_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path) if method == "GET" && path.starts_with("/api/rank") => {
            match api::rank_payload(path) {
                Ok(payload) => json_ok(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("POST", "/api/mix") => match api::mix_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::MixError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::MixError::Validation(validation)) => {
                validation_error_response(400, "Bad Request", validation)
            }
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_ok(payload: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body: payload,
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Arcadia Alchemy Lab</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
    #rank { font-size: 0.9rem; color: #666; }
  </style>
</head>
<body>
  <h1>Arcadia Alchemy Lab</h1>
  <p>Pick up to three ingredients, set level and perks, and mix.</p>

  <div class="card">
    <strong>Ingredients</strong>
    <label for="search">Search the catalog</label>
    <input id="search" placeholder="e.g. wheat" />
    <pre id="catalog">Loading…</pre>
    <label for="picks">Selected (comma-separated, max 3)</label>
    <input id="picks" value="Wheat, Blue Mountain Flower" />
  </div>

  <div class="card">
    <strong>Alchemist</strong>
    <label for="level">Level (1-100)</label>
    <input id="level" type="number" min="1" max="100" value="15" />
    <p id="rank"></p>
    <label for="perks">Alchemist perks (0-5)</label>
    <input id="perks" type="number" min="0" max="5" value="0" />
    <div><button id="mix-btn">POST /api/mix</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    const catalogEl = document.getElementById('catalog');
    const searchEl = document.getElementById('search');
    const picksEl = document.getElementById('picks');
    const levelEl = document.getElementById('level');
    const perksEl = document.getElementById('perks');
    const rankEl = document.getElementById('rank');

    let searchTimer = null;
    function fetchCatalog() {
      const q = searchEl.value.trim();
      fetch('/api/ingredients' + (q ? '?q=' + encodeURIComponent(q) : ''))
        .then(r => r.json())
        .then(data => {
          catalogEl.textContent = data.ingredients
            .map(i => i.name + ' (' + i.value + ') — ' + i.effects.join(', '))
            .join('\n') || 'No matches.';
        })
        .catch(() => { catalogEl.textContent = 'Catalog unavailable.'; });
    }
    searchEl.addEventListener('input', () => {
      if (searchTimer) clearTimeout(searchTimer);
      searchTimer = setTimeout(fetchCatalog, 300);
    });
    fetchCatalog();

    function fetchRank() {
      const level = Math.max(1, Math.min(100, Number(levelEl.value) || 15));
      fetch('/api/rank?level=' + level)
        .then(r => r.json())
        .then(data => { rankEl.textContent = data.rank; })
        .catch(() => { rankEl.textContent = ''; });
    }
    levelEl.addEventListener('input', fetchRank);
    fetchRank();

    document.getElementById('mix-btn').addEventListener('click', async () => {
      const payload = {
        ingredients: picksEl.value.split(',').map(s => s.trim()).filter(Boolean),
        level: Math.max(1, Math.min(100, Number(levelEl.value) || 15)),
        perks: Math.max(0, Math.min(5, Number(perksEl.value) || 0)),
      };
      output.textContent = 'Mixing…';
      const response = await fetch('/api/mix', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
    });
  </script>
</body>
</html>
"#
    .to_string()
}
