use anyhow::Result;
use chrono::Utc;
use dialoguer::{Confirm, Input, Select};
use keepintouch_core::KeepInTouch;
use keepintouch_core::actions::{
    CallKind, CallTarget, NO_PHONE_NUMBERS, NO_VIDEO_ADDRESSES, call_targets, place_call,
};
use keepintouch_core::catch_up::{CatchUpEffect, CatchUpEvent, CatchUpWorkflow};
use owo_colors::OwoColorize;

use crate::commands::select_contact;

/// Call a contact, then ask whether we caught up once the user is back.
pub fn run(app: &KeepInTouch, query: &str, video: bool, target: Option<usize>) -> Result<()> {
    let mut store = app.store()?;
    let resolved = select_contact(query, &store, &app.contact_book())?;
    let name = resolved.display_name();

    let kind = if video { CallKind::Video } else { CallKind::Voice };
    let targets = call_targets(&resolved.contact, kind);

    if targets.is_empty() {
        let message = match kind {
            CallKind::Voice => NO_PHONE_NUMBERS,
            CallKind::Video => NO_VIDEO_ADDRESSES,
        };
        println!("  {}", message.dimmed());
        return Ok(());
    }

    let Some(chosen) = choose_target(&targets, target)? else {
        return Ok(());
    };

    let mut workflow = CatchUpWorkflow::new();
    if !place_call(&app.dispatcher(), &mut workflow, resolved.identifier(), chosen) {
        return Ok(());
    }

    println!("{}", format!("  Calling {} at {}", name, chosen.label).green());
    Input::<String>::new()
        .with_prompt("  Press Enter when you're back")
        .allow_empty(true)
        .interact_text()?;

    let Some(CatchUpEffect::Prompt { .. }) = workflow.handle(CatchUpEvent::AppForegrounded) else {
        return Ok(());
    };

    let caught_up = Confirm::new()
        .with_prompt(format!("  Did you catch up with {name}?"))
        .default(true)
        .interact()?;

    if workflow.answer(caught_up, &mut store, Utc::now())?.is_some() {
        println!("{}", format!("  Caught up with {name} today").green());
    }

    Ok(())
}

/// Pick a target by 1-based `index`, automatically when there is only one,
/// or by asking.
fn choose_target(targets: &[CallTarget], index: Option<usize>) -> Result<Option<&CallTarget>> {
    if let Some(n) = index {
        return match n.checked_sub(1).and_then(|i| targets.get(i)) {
            Some(target) => Ok(Some(target)),
            None => anyhow::bail!("Target {} does not exist (1-{})", n, targets.len()),
        };
    }

    if targets.len() == 1 {
        return Ok(targets.first());
    }

    let items: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
    let selection = Select::new()
        .with_prompt("  Call which?")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| &targets[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<CallTarget> {
        ["555 0100", "555 0199"]
            .into_iter()
            .map(|n| CallTarget {
                kind: CallKind::Voice,
                label: n.into(),
                address: n.into(),
            })
            .collect()
    }

    #[test]
    fn explicit_target_is_one_based() {
        let targets = targets();
        assert_eq!(choose_target(&targets, Some(2)).unwrap().unwrap().label, "555 0199");
        assert!(choose_target(&targets, Some(0)).is_err());
        assert!(choose_target(&targets, Some(3)).is_err());
    }

    #[test]
    fn single_target_is_chosen_without_asking() {
        let targets = &targets()[..1];
        assert_eq!(choose_target(targets, None).unwrap().unwrap().label, "555 0100");
    }
}
