//! `vault open` - the interactive vault manager.
//!
//! Menu-driven CRUD over entries and items. All state lives in the
//! [`Session`] passed through these functions; locking is dropping it.

use std::io::IsTerminal;

use comfy_table::Table;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, Select};
use zeroize::Zeroize;

use vault_core::ItemKind;

use crate::cli::Cli;
use crate::config;
use crate::helpers::{passphrase_word_count, resolve_vault_path};
use crate::session::{unlock_with_retry, Session};

#[derive(Clone, Copy)]
enum MainAction {
    AddEntry,
    ViewEntry,
    DeleteEntry,
    Save,
    Exit,
}

#[derive(Clone, Copy)]
enum EntryAction {
    AddItem,
    ListItems,
    RevealSecret,
    DeleteItem,
    Back,
}

pub fn run(cli: &Cli, path: Option<&String>) -> anyhow::Result<()> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "`vault open` is interactive. Use `vault export` for scripted access."
        ));
    }

    let target = resolve_vault_path(cli, path)?;
    let word_count = passphrase_word_count(config::load_config()?.as_ref());
    let mut session = unlock_with_retry(&target, word_count)?;

    if !cli.quiet {
        println!(
            "Vault unlocked: {} ({} entries)",
            session.path().display(),
            session.document.entries.len()
        );
    }

    main_menu(&mut session)?;

    if !cli.quiet {
        println!("Vault locked.");
    }
    Ok(())
}

fn main_menu(session: &mut Session) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let has_entries = !session.document.entries.is_empty();

        let mut actions: Vec<(&str, MainAction)> = vec![("Add entry", MainAction::AddEntry)];
        if has_entries {
            actions.push(("View entry", MainAction::ViewEntry));
            actions.push(("Delete entry", MainAction::DeleteEntry));
        }
        actions.push(("Save vault", MainAction::Save));
        actions.push(("Exit", MainAction::Exit));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What do you want to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice].1 {
            MainAction::AddEntry => add_entry(session, &theme)?,
            MainAction::ViewEntry => {
                if let Some(entry_id) = pick_entry(session, &theme, "Select entry to view")? {
                    entry_menu(session, &theme, &entry_id)?;
                }
            }
            MainAction::DeleteEntry => delete_entry(session, &theme)?,
            MainAction::Save => {
                session.save()?;
                println!("Vault saved.");
            }
            MainAction::Exit => {
                if session.dirty {
                    let discard = Confirm::with_theme(&theme)
                        .with_prompt("You have unsaved changes. Exit without saving?")
                        .default(false)
                        .interact()?;
                    if !discard {
                        continue;
                    }
                }
                break;
            }
        }
    }
    Ok(())
}

fn add_entry(session: &mut Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Entry name")
        .interact_text()?;

    match session.document.add_entry(&name) {
        Ok(id) => {
            session.dirty = true;
            println!("Entry added: {}", id);
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

fn delete_entry(session: &mut Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let Some(entry_id) = pick_entry(session, theme, "Select entry to delete")? else {
        return Ok(());
    };
    let name = session
        .document
        .entry(&entry_id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| entry_id.clone());

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete the entry \"{}\" and all its items?", name))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Entry deletion canceled.");
        return Ok(());
    }

    match session.document.remove_entry(&entry_id) {
        Ok(()) => {
            session.dirty = true;
            println!("Entry deleted.");
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

/// Pick an entry by name with fuzzy matching. Returns the entry id.
fn pick_entry(
    session: &Session,
    theme: &ColorfulTheme,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    let names: Vec<&str> = session
        .document
        .entries
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    if names.is_empty() {
        return Ok(None);
    }

    let choice = FuzzySelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(session.document.entries[choice].id.clone()))
}

fn entry_menu(session: &mut Session, theme: &ColorfulTheme, entry_id: &str) -> anyhow::Result<()> {
    loop {
        let Some(entry) = session.document.entry(entry_id) else {
            return Ok(());
        };
        println!();
        println!("Entry: {} ({} items)", entry.name, entry.items.len());

        let has_items = !entry.items.is_empty();
        let has_secrets = entry.items.iter().any(|i| i.kind == ItemKind::Secret);

        let mut actions: Vec<(&str, EntryAction)> = vec![("Add item", EntryAction::AddItem)];
        if has_items {
            actions.push(("List items", EntryAction::ListItems));
            if has_secrets {
                actions.push(("Reveal secret item", EntryAction::RevealSecret));
            }
            actions.push(("Delete item", EntryAction::DeleteItem));
        }
        actions.push(("Back to main menu", EntryAction::Back));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let choice = Select::with_theme(theme)
            .with_prompt("What do you want to do with this entry?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice].1 {
            EntryAction::AddItem => add_item(session, theme, entry_id)?,
            EntryAction::ListItems => list_items(session, entry_id),
            EntryAction::RevealSecret => reveal_secret_item(session, theme, entry_id)?,
            EntryAction::DeleteItem => delete_item(session, theme, entry_id)?,
            EntryAction::Back => break,
        }
    }
    Ok(())
}

fn add_item(session: &mut Session, theme: &ColorfulTheme, entry_id: &str) -> anyhow::Result<()> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Item name")
        .interact_text()?;

    let kinds = ["Public", "Secret"];
    let kind = match Select::with_theme(theme)
        .with_prompt("Item type")
        .items(&kinds)
        .default(0)
        .interact()?
    {
        0 => ItemKind::Public,
        _ => ItemKind::Secret,
    };

    let mut value = read_multiline_value(theme)?;
    if value.trim().is_empty() {
        eprintln!("Value cannot be empty.");
        return Ok(());
    }

    let stored = match kind {
        ItemKind::Public => value,
        ItemKind::Secret => {
            let sealed = session.seal_secret(&value)?;
            value.zeroize();
            sealed
        }
    };

    let Some(entry) = session.document.entry_mut(entry_id) else {
        return Ok(());
    };
    match entry.add_item(&name, kind, stored) {
        Ok(id) => {
            session.document.touch();
            session.dirty = true;
            println!("Item added: {}", id);
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

/// Read a possibly multi-line value, terminated by an empty line.
fn read_multiline_value(theme: &ColorfulTheme) -> anyhow::Result<String> {
    println!("Enter the value (finish with an empty line):");
    let mut value = String::new();
    loop {
        let line: String = Input::with_theme(theme)
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;
        if line.trim().is_empty() {
            break;
        }
        if !value.is_empty() {
            value.push('\n');
        }
        value.push_str(&line);
    }
    Ok(value)
}

fn list_items(session: &Session, entry_id: &str) {
    let Some(entry) = session.document.entry(entry_id) else {
        return;
    };

    let mut table = Table::new();
    table.set_header(vec!["Name", "Type", "Value"]);
    for item in &entry.items {
        let (kind, value) = match item.kind {
            ItemKind::Public => ("public", item.value.clone()),
            ItemKind::Secret => ("secret", "*****".to_string()),
        };
        table.add_row(vec![item.name.clone(), kind.to_string(), value]);
    }
    println!("{table}");
}

fn reveal_secret_item(
    session: &Session,
    theme: &ColorfulTheme,
    entry_id: &str,
) -> anyhow::Result<()> {
    let Some(entry) = session.document.entry(entry_id) else {
        return Ok(());
    };
    let secrets: Vec<(String, String)> = entry
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Secret)
        .map(|i| (i.name.clone(), i.value.clone()))
        .collect();
    if secrets.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = secrets.iter().map(|(name, _)| name.as_str()).collect();
    let choice = FuzzySelect::with_theme(theme)
        .with_prompt("Select item to reveal")
        .items(&names)
        .default(0)
        .interact()?;

    match session.reveal_secret(&secrets[choice].1) {
        Ok(revealed) => println!("{}: {}", secrets[choice].0, &*revealed),
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}

fn delete_item(session: &mut Session, theme: &ColorfulTheme, entry_id: &str) -> anyhow::Result<()> {
    let Some(entry) = session.document.entry(entry_id) else {
        return Ok(());
    };
    let items: Vec<(String, String)> = entry
        .items
        .iter()
        .map(|i| (i.id.clone(), i.name.clone()))
        .collect();
    if items.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = items.iter().map(|(_, name)| name.as_str()).collect();
    let choice = FuzzySelect::with_theme(theme)
        .with_prompt("Select item to delete")
        .items(&names)
        .default(0)
        .interact()?;

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete the item \"{}\"?", items[choice].1))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Item deletion canceled.");
        return Ok(());
    }

    let Some(entry) = session.document.entry_mut(entry_id) else {
        return Ok(());
    };
    match entry.remove_item(&items[choice].0) {
        Ok(()) => {
            session.document.touch();
            session.dirty = true;
            println!("Item deleted.");
        }
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}
