//! Admin pages: login form and the token list.
//!
//! Rendered inline; every dynamic value goes through `escape_html`.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jiaofu_config::defaults::ADMIN_COOKIE_MAX_AGE_SECS;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{ADMIN_COOKIE, found};
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "authKey", default)]
    pub auth_key: String,
}

/// Handler for `GET /auth`.
pub async fn login_page() -> Html<String> {
    render_login(None)
}

/// Handler for `POST /auth`.
///
/// Sets the admin cookie (1 hour, HTTP-only, not Secure) and redirects to
/// `/` on a correct key; re-renders the form otherwise.
pub async fn login(
    State(state): State<GatewayState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.admin_key.verify(Some(&form.auth_key)) {
        warn!("Admin login failed");
        return render_login(Some("Invalid admin key")).into_response();
    }

    info!("Admin login succeeded");
    let cookie = Cookie::build((ADMIN_COOKIE, form.auth_key))
        .path("/")
        .max_age(time::Duration::seconds(ADMIN_COOKIE_MAX_AGE_SECS))
        .http_only(true)
        .secure(false)
        .build();
    (jar.add(cookie), found("/")).into_response()
}

/// Handler for `GET /`: the token list with add/remove controls.
pub async fn users_page(State(state): State<GatewayState>) -> Html<String> {
    let tokens = state.tokens.list().await;
    let rows: String = tokens
        .iter()
        .map(|t| {
            let t = escape_html(t);
            format!(
                "<li><code>{t}</code> <button data-uname=\"{t}\" class=\"remove\">Remove</button></li>\n"
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Users</title></head>
<body>
<h1>Authorized tokens ({count})</h1>
<ul id="users">
{rows}</ul>
<form id="add">
  <input name="uname" placeholder="token" required>
  <button type="submit">Add</button>
</form>
<p id="status"></p>
<script>
async function call(path, uname) {{
  const res = await fetch(path, {{
    method: 'POST',
    headers: {{ 'Content-Type': 'application/json' }},
    body: JSON.stringify({{ uname }})
  }});
  const data = await res.json();
  if (res.ok) {{ location.reload(); }}
  else {{ document.getElementById('status').textContent = data.error; }}
}}
document.getElementById('add').addEventListener('submit', (e) => {{
  e.preventDefault();
  call('/users/add', e.target.uname.value);
}});
document.querySelectorAll('button.remove').forEach((b) => {{
  b.addEventListener('click', () => call('/users/remove', b.dataset.uname));
}});
</script>
</body>
</html>
"#,
        count = tokens.len(),
    ))
}

fn render_login(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape_html(e)))
        .unwrap_or_default();
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Admin login</title></head>
<body>
<h1>Admin login</h1>
{error}<form method="post" action="/auth">
  <input type="password" name="authKey" placeholder="admin key" required>
  <button type="submit">Log in</button>
</form>
</body>
</html>
"#
    ))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn login_shows_error() {
        let Html(page) = render_login(Some("Invalid admin key"));
        assert!(page.contains("Invalid admin key"));
        let Html(page) = render_login(None);
        assert!(!page.contains("class=\"error\""));
    }
}
