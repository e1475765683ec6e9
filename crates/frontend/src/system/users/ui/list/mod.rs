pub mod state;

use contracts::system::users::{AdminUser, UserStatus};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::user_avatar::UserAvatar;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::http::Notice;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::toasts::use_toasts;
use crate::system::auth::context::use_api;
use crate::system::users::api;
use crate::system::users::ui::modal::form::{to_payload, FieldErrors, FormMode, UserFormValues};
use crate::system::users::ui::modal::state::{classify_submit, ModalState, SubmitOutcome};
use crate::system::users::ui::modal::UserModal;
use state::{create_state, StatusFilter, UsersListState, PAGE_SIZE_OPTIONS};

pub fn user_detail_path(user: &AdminUser) -> String {
    format!("/management/system/user/{}", user.id)
}

fn status_badge(status: UserStatus) -> impl IntoView {
    let class = if status.is_active() {
        "badge badge--success"
    } else {
        "badge badge--muted"
    };
    view! { <span class=class>{status.label()}</span> }
}

/// Administrators: filterable, paged table with create/edit/delete.
#[component]
pub fn UsersListPage() -> impl IntoView {
    let client = use_api();
    let toasts = use_toasts();
    let state = create_state();
    let modal = RwSignal::new(ModalState::default());
    let saving = RwSignal::new(false);

    // Only committed filters, paging and the revision counter feed the key,
    // so typing alone never refetches.
    let query_key = Memo::new(move |_| state.with(|s| s.query_key()));

    Effect::new({
        let client = client.clone();
        move |_| {
            let key = query_key.get();
            let Some(ticket) = state.try_update(UsersListState::begin_fetch) else {
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                let result = api::list(&client, &key.params())
                    .await
                    .map_err(|e| e.to_string());
                if let Some(false) = state.try_update(|s| s.finish_fetch(ticket, result)) {
                    log::debug!("users list: dropped stale response");
                }
            });
        }
    });

    on_cleanup(move || {
        state.try_update(|s| s.cancel_search());
    });

    let on_search_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let now = js_sys::Date::now() as u64;
        let Some(ticket) = state.try_update(|s| s.type_search(value, now)) else {
            return;
        };
        let delay = state.with_untracked(|s| s.search_delay_ms());
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            state.try_update(|s| s.search_timer_elapsed(ticket));
        });
    };

    let on_status_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        state.update(|s| s.status_input = StatusFilter::from_value(&value));
    };

    let on_modal_ok = Callback::new({
        let client = client.clone();
        move |(values, reply): (UserFormValues, Callback<FieldErrors>)| {
            let mode = modal.with_untracked(|m| m.mode.clone());
            let payload = to_payload(&values);
            let client = client.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match &mode {
                    FormMode::Create => api::create(&client, &payload).await,
                    FormMode::Edit(id) => api::update(&client, id, &payload).await,
                };
                saving.try_set(false);
                // Only a save writes the modal; anything else leaves the open
                // form (values and field errors) as it is.
                match classify_submit(&mode, result) {
                    SubmitOutcome::Saved => {
                        modal.try_update(|m| m.close());
                        if mode.is_create() {
                            toasts.push(Notice::success("User created"));
                            state.try_update(|s| s.after_create());
                        } else {
                            toasts.push(Notice::success("User updated"));
                            state.try_update(|s| s.invalidate());
                        }
                    }
                    SubmitOutcome::FieldErrors(errors) => reply.run(errors),
                    SubmitOutcome::Failed { notice: Some(message) } => {
                        toasts.push(Notice::error(message))
                    }
                    SubmitOutcome::Failed { notice: None } => {}
                }
            });
        }
    });

    let confirm_delete = {
        let client = client.clone();
        move || {
            let Some(user) = state.try_update(|s| s.begin_delete()).flatten() else {
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                match api::remove(&client, &user.id).await {
                    Ok(()) => {
                        toasts.push(Notice::success("User deleted"));
                        state.try_update(|s| s.delete_completed());
                    }
                    Err(e) => {
                        log::warn!("delete user {} failed: {}", user.id, e);
                        state.try_update(|s| s.delete_failed());
                    }
                }
            });
        }
    };

    let is_loading = Signal::derive(move || state.with(|s| s.is_loading()));
    let deleting = Signal::derive(move || state.with(|s| s.is_deleting()));
    let modal_open = Memo::new(move |_| modal.with(|m| m.show));

    let row = move |user: AdminUser| {
        let for_edit = user.clone();
        let for_delete = user.clone();
        let name = user.full_name();
        let detail_path = user_detail_path(&user);
        let view_path = detail_path.clone();
        let avatar = user.avatar.clone().unwrap_or_default();
        let avatar_email = user.email.clone();
        let email = user.email.clone();
        let status = user.status;
        let date_joined = user.date_joined.clone();
        view! {
            <TableRow>
                <TableCell>
                    <TableCellLayout>
                        <div class="user-cell">
                            <UserAvatar
                                src=avatar
                                name=name.clone().unwrap_or_default()
                                email=avatar_email
                            />
                            <A href=detail_path>
                                {name.unwrap_or_else(|| "-".to_string())}
                            </A>
                        </div>
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>{email}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{status_badge(status)}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{format_datetime_opt(date_joined.as_deref())}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <div class="row-actions">
                            <A href=view_path attr:class="row-actions__btn" attr:title="View">
                                {icon("eye")}
                            </A>
                            <button
                                class="row-actions__btn"
                                title="Edit"
                                on:click=move |_| modal.update(|m| m.open_edit(&for_edit))
                            >
                                {icon("edit")}
                            </button>
                            <button
                                class="row-actions__btn row-actions__btn--danger"
                                title="Delete"
                                on:click=move |_| {
                                    let user = for_delete.clone();
                                    state.update(|s| s.request_delete(user))
                                }
                            >
                                {icon("trash")}
                            </button>
                        </div>
                    </TableCellLayout>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <div class="page">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h1 class="page__title">"Administrators"</h1>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| modal.update(|m| m.open_create())
                >
                    {icon("plus")}
                    " New"
                </Button>
            </Flex>

            <div class="filter-bar">
                <input
                    type="search"
                    class="form__input filter-bar__search"
                    placeholder="Search by name or email"
                    prop:value=move || state.with(|s| s.search_input.clone())
                    on:input=on_search_input
                />
                <select
                    class="form__select"
                    prop:value=move || state.with(|s| s.status_input.value())
                    on:change=on_status_change
                >
                    {StatusFilter::ALL
                        .into_iter()
                        .map(|f| view! { <option value=f.value()>{f.label()}</option> })
                        .collect_view()}
                </select>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| state.update(|s| s.apply_filters())
                    >
                        {icon("filter")}
                        " Filter"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| state.update(|s| s.reset_filters())
                    >
                        {icon("refresh")}
                        " Reset"
                    </Button>
                </Space>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="alert alert--error">{e}</div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Email"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                        <TableHeaderCell>"Joined"</TableHeaderCell>
                        <TableHeaderCell>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || state.with(|s| s.items.clone()).into_iter().map(row).collect_view()}
                </TableBody>
            </Table>

            <Show when=move || state.with(|s| s.items.is_empty() && !s.is_loading())>
                <div class="table-empty">"No users found"</div>
            </Show>
            <Show when=move || is_loading.get()>
                <div class="table-loading">"Loading..."</div>
            </Show>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                total_count=Signal::derive(move || state.with(|s| s.total))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=Callback::new(move |page| state.update(|s| s.go_to_page(page)))
                on_page_size_change=Callback::new(move |size| state.update(|s| s.change_page_size(size)))
                page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                disabled=is_loading
            />

            <UserModal
                title=Signal::derive(move || modal.with(|m| m.title.clone()))
                show=modal_open
                mode=Signal::derive(move || modal.with(|m| m.mode.clone()))
                form_value=Signal::derive(move || modal.with(|m| m.form_value.clone()))
                loading=saving
                on_ok=on_modal_ok
                on_cancel=Callback::new(move |_| modal.update(|m| m.close()))
            />

            <Show when=move || state.with(|s| s.delete_candidate().is_some())>
                <ModalFrame
                    title="Delete User".to_string()
                    on_close=Callback::new(move |_| state.update(|s| s.cancel_delete()))
                    busy=deleting
                    footer={
                        let confirm_delete = confirm_delete.clone();
                        move || {
                            let confirm_delete = confirm_delete.clone();
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| state.update(|s| s.cancel_delete())
                                    disabled=deleting
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| confirm_delete()
                                    disabled=deleting
                                >
                                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                </Button>
                            }
                        }
                    }
                >
                    <p>
                        {move || state.with(|s| {
                            s.delete_candidate()
                                .map(|u| format!("Delete user {}? This cannot be undone.", u.email))
                                .unwrap_or_default()
                        })}
                    </p>
                </ModalFrame>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserId;

    #[test]
    fn detail_path_uses_record_id() {
        let user = AdminUser {
            id: UserId::Text("abc".into()),
            email: "a@b.io".into(),
            first_name: None,
            last_name: None,
            avatar: None,
            status: UserStatus::Enabled,
            date_joined: None,
        };
        assert_eq!(user_detail_path(&user), "/management/system/user/abc");
    }
}
