//! Breadcrumbs Component

use layout_core::ParentRef;
use leptos::prelude::*;

use crate::context::use_editor;

#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let ctx = use_editor();
    let level = ctx.session.with_untracked(|s| s.level().clone());
    let is_root = level.parent == ParentRef::Root;

    view! {
        <nav class="layout-breadcrumbs">
            <a href="/layout/">"Layout"</a>
            {level.ancestors.into_iter().map(|crumb| view! {
                <span class="crumb-separator">" / "</span>
                <a href=format!("/layout/{}/", crumb.id)>{crumb.name}</a>
            }).collect_view()}
            {(!is_root).then(|| {
                let label = level
                    .parent_kind
                    .item_type()
                    .map(|t| t.display_name())
                    .unwrap_or_default();
                view! {
                    <span class="crumb-separator">" / "</span>
                    <span class="crumb-current">{label}</span>
                }
            })}
        </nav>
    }
}
