use leptos::prelude::*;

/// Up to two uppercase initials: first and last word of the name, else the
/// first letter of the email, else "U".
pub fn initials(name: Option<&str>, email: Option<&str>) -> String {
    let words: Vec<&str> = name.unwrap_or("").split_whitespace().collect();
    if let Some(first) = words.first() {
        let mut out: String = first.chars().take(1).collect();
        if words.len() > 1 {
            if let Some(last) = words.last() {
                out.extend(last.chars().take(1));
            }
        }
        let out = out.to_uppercase();
        if !out.is_empty() {
            return out;
        }
    }
    email
        .and_then(|e| e.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

/// Round avatar: the image when there is one, initials otherwise.
#[component]
pub fn UserAvatar(
    #[prop(optional)] src: Option<String>,
    #[prop(optional)] name: Option<String>,
    #[prop(optional)] email: Option<String>,
    #[prop(default = 32)] size: u32,
) -> impl IntoView {
    let name = name.filter(|n| !n.trim().is_empty());
    let label = name
        .clone()
        .or_else(|| email.clone())
        .unwrap_or_else(|| "User".to_string());
    let text = initials(name.as_deref(), email.as_deref());
    let style = format!(
        "width: {size}px; height: {size}px; font-size: {}px;",
        (size * 2 / 5).max(10)
    );

    view! {
        <span class="avatar" style=style aria-label=label>
            {match src.filter(|s| !s.is_empty()) {
                Some(src) => view! { <img class="avatar__image" src=src alt="" /> }.into_any(),
                None => view! { <span class="avatar__initials">{text}</span> }.into_any(),
            }}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_word() {
        assert_eq!(initials(Some("ada byron king"), None), "AK");
        assert_eq!(initials(Some("  Grace  "), Some("g@x.io")), "G");
    }

    #[test]
    fn falls_back_to_email_then_placeholder() {
        assert_eq!(initials(Some("   "), Some(" zed@x.io")), "Z");
        assert_eq!(initials(None, None), "U");
        assert_eq!(initials(None, Some("")), "U");
    }
}
