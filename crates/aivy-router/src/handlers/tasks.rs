// SPDX-FileCopyrightText: 2026 Aivy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task-manager handler: creates follow-up tasks for a captured contact.

use tracing::debug;

use aivy_core::StorageAdapter;
use aivy_memory::SessionContext;

use super::HandlerOutcome;

/// Leading trigger phrase stripped from the message to derive the title.
const TASK_TRIGGER: &str = "create task";

/// Create a follow-up task linked to the session's lead contact.
///
/// Without a captured contact there is nothing to link the task to, so
/// the handler asks for one instead of writing anything.
pub async fn handle(
    storage: &dyn StorageAdapter,
    message: &str,
    context: &SessionContext,
) -> HandlerOutcome {
    let Some(contact_id) = context.lead_contact_id.as_deref() else {
        return HandlerOutcome::text(
            "I need to know which contact this task is for. \
             Please share a contact name or email first.",
        );
    };

    let title = strip_task_trigger(message);
    if title.is_empty() {
        return HandlerOutcome::text(
            "What should the task say? Give me a short description and I'll record it.",
        );
    }

    match storage.insert_task(contact_id, &title, Some(message)).await {
        Ok(task) => {
            debug!(task_id = %task.id, contact_id, "follow-up task created");
            HandlerOutcome::text(format!(
                "Done -- I've created the follow-up task \"{title}\" for your contact."
            ))
        }
        Err(error) => HandlerOutcome::Failure { error },
    }
}

/// Strip the trigger phrase, case-insensitively, to derive a title.
///
/// The trigger is ASCII, so a byte-wise case-insensitive search always
/// lands on a character boundary.
fn strip_task_trigger(message: &str) -> String {
    let trimmed = message.trim();
    let trigger = TASK_TRIGGER.as_bytes();
    let pos = trimmed
        .as_bytes()
        .windows(trigger.len())
        .position(|w| w.eq_ignore_ascii_case(trigger));
    match pos {
        Some(pos) => {
            let mut rest = String::new();
            rest.push_str(&trimmed[..pos]);
            rest.push_str(&trimmed[pos + trigger.len()..]);
            rest.trim().trim_start_matches(':').trim().to_string()
        }
        None => trimmed.to_string(),
    }
}
