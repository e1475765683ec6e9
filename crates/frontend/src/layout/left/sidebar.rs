//! Sidebar navigation. Links go through the router so the active entry is
//! marked with `aria-current`.

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (path, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Management",
            items: vec![("/management/system/user", "Administrators", "users")],
        },
        MenuGroup {
            label: "Account",
            items: vec![("/profile/password", "Change Password", "key")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            {get_menu_groups()
                .into_iter()
                .map(|group| view! {
                    <div class="sidebar__group">
                        <div class="sidebar__group-label">{group.label}</div>
                        {group
                            .items
                            .into_iter()
                            .map(|(path, label, icon_name)| view! {
                                <A href=path attr:class="sidebar__item">
                                    {icon(icon_name)}
                                    <span>{label}</span>
                                </A>
                            })
                            .collect_view()}
                    </div>
                })
                .collect_view()}
        </nav>
    }
}
