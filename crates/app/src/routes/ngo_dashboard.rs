use crate::auth::{use_auth, Identity};
use crate::guard::AccessGuard;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::guard::RoleRequirement;
use shared_types::{
    AppError, IssueAction, IssueResponse, IssueStatus, NgoResponse, Role, StatusFilter,
};
use shared_ui::{
    Alert, AlertVariant, Badge, BadgeVariant, Button, ButtonVariant, DetailItem, DetailList,
    FormSelect, PageActions, PageHeader, PageLead, PageTitle, Skeleton,
};

/// Issue triage for partner organizations.
#[component]
pub fn NgoDashboard() -> Element {
    rsx! {
        AccessGuard { requirement: RoleRequirement::Member(Role::Ngo),
            Dashboard {}
        }
    }
}

fn status_badge(status: IssueStatus) -> BadgeVariant {
    match status {
        IssueStatus::New => BadgeVariant::Warning,
        IssueStatus::InProgress => BadgeVariant::Info,
        IssueStatus::Resolved => BadgeVariant::Success,
    }
}

/// `2026-03-01T09:30:00+00:00` as `Mar 1, 2026 09:30`; unparseable input
/// is shown as-is.
fn display_time(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

/// Replace the entry with the same id, keeping list order.
fn mirror(list: &mut [IssueResponse], updated: &IssueResponse) {
    if let Some(slot) = list.iter_mut().find(|i| i.id == updated.id) {
        *slot = updated.clone();
    }
}

fn count(list: &[IssueResponse], status: IssueStatus) -> usize {
    list.iter().filter(|i| i.status == status).count()
}

#[component]
fn Dashboard() -> Element {
    let mut auth = use_auth();
    let hub = use_context::<Identity>();
    let mut profile = use_signal(|| Option::<NgoResponse>::None);
    let mut filter = use_signal(StatusFilter::default);
    let mut issues = use_signal(Vec::<IssueResponse>::new);
    let mut selected = use_signal(|| Option::<IssueResponse>::None);
    let mut loading = use_signal(|| true);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut updating = use_signal(|| false);

    // Confirm partner status on every mount; a non-member is signed out.
    use_hook(move || {
        let hub = hub.clone();
        spawn(async move {
            match server::api::get_ngo_profile().await {
                Ok(ngo) => profile.set(Some(ngo)),
                Err(e) => {
                    tracing::warn!(error = %e, "Dashboard visitor is not an NGO member");
                    if let Err(e) = server::api::logout().await {
                        tracing::warn!(error = %e, "Forced logout failed");
                    }
                    auth.clear_auth();
                    hub.publish(None);
                    navigator().replace(Route::LoginNgo {});
                }
            }
        });
    });

    // Full re-fetch whenever the filter changes. A response for a filter
    // that is no longer selected is discarded.
    use_effect(move || {
        let wanted = filter();
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            let result = server::api::list_issues(wanted).await;
            if *filter.peek() != wanted {
                return;
            }
            match result {
                Ok(list) => issues.set(list),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load issues");
                    error_msg.set(Some(AppError::friendly_message(&e.to_string())));
                }
            }
            loading.set(false);
        });
    });

    let apply_action = move |id: String, action: IssueAction| {
        spawn(async move {
            updating.set(true);
            error_msg.set(None);
            match server::api::update_issue_status(id, action).await {
                Ok(updated) => {
                    mirror(&mut issues.write(), &updated);
                    let matches_selected = selected
                        .peek()
                        .as_ref()
                        .is_some_and(|s| s.id == updated.id);
                    if matches_selected {
                        selected.set(Some(updated));
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Status update failed");
                    error_msg.set(Some(AppError::friendly_message(&e.to_string())));
                }
            }
            updating.set(false);
        });
    };

    let org_name = profile
        .read()
        .as_ref()
        .map(|p| p.org_name.clone())
        .unwrap_or_else(|| "NGO".to_string());
    let list = issues.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./ngo_dashboard.css") }

        PageHeader {
            PageTitle { "NGO Dashboard" }
            PageLead { "Signed in as {org_name}. Review reported issues and track them to resolution." }
            PageActions {
                FormSelect {
                    label: "Filter by status",
                    value: filter().as_query().to_string(),
                    onchange: move |e: FormEvent| {
                        if let Ok(next) = e.value().parse::<StatusFilter>() {
                            selected.set(None);
                            filter.set(next);
                        }
                    },
                    for option in StatusFilter::ALL {
                        option { key: "{option.as_query()}", value: option.as_query(), "{option.label()}" }
                    }
                }
            }
        }

        div { class: "dashboard-counts",
            for status in IssueStatus::ALL {
                div { key: "{status.as_str()}", class: "dashboard-count",
                    span { class: "dashboard-count-value", "{count(&list, status)}" }
                    span { class: "dashboard-count-label", "{status.label()}" }
                }
            }
        }

        if let Some(err) = error_msg() {
            Alert { variant: AlertVariant::Error, "{err}" }
        }

        div { class: "dashboard-body",
            section { class: "issue-list",
                if loading() {
                    for i in 0..4 {
                        Skeleton { key: "{i}", class: "issue-row-skeleton" }
                    }
                } else if list.is_empty() {
                    p { class: "muted", "No issues found for {filter().label().to_lowercase()}." }
                } else {
                    for issue in list.iter().cloned() {
                        button {
                            key: "{issue.id}",
                            r#type: "button",
                            class: if selected.read().as_ref().is_some_and(|s| s.id == issue.id) { "issue-row selected" } else { "issue-row" },
                            onclick: {
                                let issue = issue.clone();
                                move |_| selected.set(Some(issue.clone()))
                            },
                            div { class: "issue-row-head",
                                strong { "{issue.title}" }
                                Badge { variant: status_badge(issue.status), "{issue.status.label()}" }
                            }
                            p { class: "issue-row-meta",
                                "{issue.category.label()} \u{b7} {issue.location} \u{b7} {display_time(&issue.created_at)}"
                            }
                        }
                    }
                }
            }

            if let Some(issue) = selected() {
                {
                    let id = issue.id.clone();
                    rsx! {
                        IssueDetail {
                            issue,
                            updating: updating(),
                            on_close: move |_| selected.set(None),
                            on_action: move |action: IssueAction| apply_action(id.clone(), action),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn IssueDetail(
    issue: IssueResponse,
    updating: bool,
    on_close: EventHandler<()>,
    on_action: EventHandler<IssueAction>,
) -> Element {
    let action = issue.status.next_action();
    let reporter = if issue.is_anonymous() {
        "Anonymous".to_string()
    } else {
        issue.reporter_email.clone()
    };

    rsx! {
        aside { class: "issue-detail",
            div { class: "issue-detail-head",
                h2 { "{issue.title}" }
                button {
                    r#type: "button",
                    class: "issue-detail-close",
                    aria_label: "Close",
                    onclick: move |_| on_close.call(()),
                    "\u{d7}"
                }
            }
            Badge { variant: status_badge(issue.status), "{issue.status.label()}" }

            DetailList {
                DetailItem { label: "Category", value: issue.category.label().to_string() }
                DetailItem { label: "Location", value: issue.location.clone() }
                DetailItem { label: "Reported by", value: reporter }
                DetailItem { label: "Reported on", value: display_time(&issue.created_at) }
                if let Some(phone) = &issue.contact_phone {
                    DetailItem { label: "Contact phone", value: phone.clone() }
                }
                if let Some(updated) = &issue.updated_at {
                    DetailItem { label: "Last updated", value: display_time(updated) }
                }
                if let Some(handler) = &issue.handled_by {
                    DetailItem { label: "Handled by", value: format!("{} ({})", handler.ngo_name, handler.ngo_email) }
                }
            }

            h3 { "Description" }
            p { class: "issue-detail-description", "{issue.description}" }

            if !issue.image_urls.is_empty() {
                h3 { "Photos" }
                div { class: "issue-gallery",
                    for (i, url) in issue.image_urls.iter().enumerate() {
                        a { key: "{i}", href: "{url}", target: "_blank", rel: "noopener",
                            img { src: "{url}", alt: format!("Issue photo {}", i + 1) }
                        }
                    }
                }
            }

            div { class: "issue-detail-actions",
                Button {
                    variant: match action {
                        IssueAction::Reopen => ButtonVariant::Outline,
                        _ => ButtonVariant::Primary,
                    },
                    disabled: updating,
                    onclick: move |_| on_action.call(action),
                    if updating { "Updating..." } else { "{action.label()}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issue(id: &str, status: IssueStatus) -> IssueResponse {
        IssueResponse {
            id: id.into(),
            title: format!("Issue {}", id),
            description: "Streetlight out".into(),
            location: "Lalitpur".into(),
            category: Default::default(),
            status,
            reporter_id: "anonymous".into(),
            reporter_email: "anonymous".into(),
            image_urls: vec![],
            contact_phone: None,
            created_at: "2026-03-01T09:30:00+00:00".into(),
            updated_at: None,
            handled_by: None,
        }
    }

    #[test]
    fn mirror_replaces_in_place() {
        let mut list = vec![issue("a", IssueStatus::New), issue("b", IssueStatus::New)];
        let updated = issue("b", IssueStatus::InProgress);
        mirror(&mut list, &updated);
        assert_eq!(list[1].status, IssueStatus::InProgress);
        assert_eq!(list[0].status, IssueStatus::New);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn mirror_ignores_unknown_ids() {
        let mut list = vec![issue("a", IssueStatus::New)];
        mirror(&mut list, &issue("z", IssueStatus::Resolved));
        assert_eq!(list, vec![issue("a", IssueStatus::New)]);
    }

    #[test]
    fn counts_by_status() {
        let list = vec![
            issue("a", IssueStatus::New),
            issue("b", IssueStatus::Resolved),
            issue("c", IssueStatus::Resolved),
        ];
        assert_eq!(count(&list, IssueStatus::Resolved), 2);
        assert_eq!(count(&list, IssueStatus::InProgress), 0);
    }

    #[test]
    fn time_is_humanized() {
        assert_eq!(display_time("2026-03-01T09:30:00+00:00"), "Mar 1, 2026 09:30");
        assert_eq!(display_time("yesterday"), "yesterday");
    }
}
