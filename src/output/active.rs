//! Active sensuctl session summary

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::session::ActiveSession;

use super::underline;

const ARROW: &str = "\u{2192}";

/// Render the "Active Config" block, or the unable-to-read notice when no
/// usable cluster file was found
pub fn render_active_session(active: &ActiveSession, now: DateTime<Utc>) -> String {
    let Some(session) = active.session.as_ref().filter(|s| !s.api_url.is_empty()) else {
        return "Unable to read sensuctl (~/.config/sensu/sensuctl/) cluster & profile.\n\n"
            .to_string();
    };

    let (namespace, format) = active
        .display
        .as_ref()
        .map(|d| (d.namespace.as_str(), d.format.as_str()))
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "Active Config");
    let _ = writeln!(out, "{}", underline("active config"));
    let _ = writeln!(out, "{} API: {}", ARROW, session.api_url);
    let _ = writeln!(out, "{} Namespace: {}", ARROW, namespace);
    let _ = writeln!(out, "{} Format: {}", ARROW, format);
    if let Some(expiry) = describe_expiry(session.expires_at, now) {
        let _ = writeln!(out, "{} Token: {}", ARROW, expiry);
    }
    out.push('\n');
    out
}

fn describe_expiry(expires_at: i64, now: DateTime<Utc>) -> Option<String> {
    if expires_at <= 0 {
        return None;
    }
    let at = DateTime::<Utc>::from_timestamp(expires_at, 0)?;
    let stamp = at.format("%Y-%m-%d %H:%M:%S UTC");
    Some(if at <= now {
        format!("expired {}", stamp)
    } else {
        format!("expires {}", stamp)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DisplayDescriptor, SessionDescriptor};

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn active(expires_at: i64) -> ActiveSession {
        ActiveSession {
            session: Some(SessionDescriptor {
                api_url: "https://x.test".to_string(),
                expires_at,
                ..Default::default()
            }),
            display: Some(DisplayDescriptor {
                format: "tabular".to_string(),
                namespace: "default".to_string(),
            }),
        }
    }

    #[test]
    fn test_missing_session_prints_notice() {
        let text = render_active_session(&ActiveSession::default(), now());
        assert!(text.starts_with("Unable to read sensuctl"));
    }

    #[test]
    fn test_session_without_api_prints_notice() {
        let active = ActiveSession {
            session: Some(SessionDescriptor::default()),
            display: None,
        };
        assert!(render_active_session(&active, now()).starts_with("Unable to read"));
    }

    #[test]
    fn test_active_block() {
        let text = render_active_session(&active(0), now());
        assert!(text.starts_with("Active Config\n─────────────\n"));
        assert!(text.contains("→ API: https://x.test\n"));
        assert!(text.contains("→ Namespace: default\n"));
        assert!(text.contains("→ Format: tabular\n"));
        assert!(!text.contains("Token"));
    }

    #[test]
    fn test_missing_display_leaves_fields_empty() {
        let mut a = active(0);
        a.display = None;
        let text = render_active_session(&a, now());
        assert!(text.contains("→ Namespace: \n"));
    }

    #[test]
    fn test_token_expiry() {
        let text = render_active_session(&active(1_700_003_600), now());
        assert!(text.contains("→ Token: expires 2023-11-14 23:13:20 UTC"));

        let text = render_active_session(&active(1_600_000_000), now());
        assert!(text.contains("→ Token: expired"));
    }
}
