//! Interactive variable manager.
//!
//! Input comes through a [`Prompter`]: `inquire` prompts on a terminal, plain
//! lines otherwise. Turning a chosen action into a store update and a message
//! lives in [`apply`].

use std::{
    io::{self, BufRead, IsTerminal, Write},
    str::FromStr,
};

use anyhow::Result;
use inquire::{CustomType, InquireError, Text, validator::Validation};
use meteo_core::VariableStore;

use crate::output;

pub const MENU: &str = "\nWeather Variable Manager Menu\n\
                        1. Add/Update Variable\n\
                        2. Retrieve Variable\n\
                        3. Remove Variable\n\
                        4. List All Variables\n\
                        5. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Define,
    Retrieve,
    Remove,
    List,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Define),
            "2" => Ok(MenuChoice::Retrieve),
            "3" => Ok(MenuChoice::Remove),
            "4" => Ok(MenuChoice::List),
            "5" => Ok(MenuChoice::Exit),
            other => Err(format!("'{other}' is not a menu option")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    Define { name: String, value: f64 },
    Retrieve { name: String },
    Remove { name: String },
    List,
    Exit,
}

/// Apply `action` to `store` and return the message to show the user.
pub fn apply(store: &mut VariableStore, action: MenuAction) -> String {
    match action {
        MenuAction::Define { name, value } => match store.define(name, value) {
            None => "Variable added successfully.".to_string(),
            Some(previous) => format!("Variable updated successfully (was {previous})."),
        },
        MenuAction::Retrieve { name } => match store.get(&name) {
            Ok(value) => format!("Variable value: {value}"),
            Err(e) => e.to_string(),
        },
        MenuAction::Remove { name } => match store.remove(&name) {
            Ok(_) => "Variable removed successfully.".to_string(),
            Err(e) => format!("{e}, nothing removed."),
        },
        MenuAction::List => output::variables(store),
        MenuAction::Exit => "Exiting the variable manager.".to_string(),
    }
}

/// Source of menu input and sink for its messages.
pub trait Prompter {
    fn say(&mut self, message: &str) -> Result<()>;

    /// Raw menu choice, or `None` when input is exhausted or cancelled.
    fn choice(&mut self) -> Result<Option<String>>;

    fn name(&mut self, message: &str) -> Result<Option<String>>;

    fn value(&mut self, message: &str) -> Result<Option<f64>>;
}

/// Map a cancelled prompt (Esc / Ctrl-C) to `None`.
fn answered<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prompts drawn with `inquire`; needs a terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }

    fn choice(&mut self) -> Result<Option<String>> {
        answered(Text::new("Enter your choice:").prompt())
    }

    fn name(&mut self, message: &str) -> Result<Option<String>> {
        let name = Text::new(message)
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("Variable name cannot be empty".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt();

        Ok(answered(name)?.map(|n| n.trim().to_string()))
    }

    fn value(&mut self, message: &str) -> Result<Option<f64>> {
        let value = CustomType::<f64>::new(message)
            .with_error_message("Please type a number")
            .prompt();
        answered(value)
    }
}

/// Line-oriented prompts for piped or redirected input.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `message` and read one trimmed line; `None` at end of input.
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn choice(&mut self) -> Result<Option<String>> {
        self.read_line("Enter your choice:")
    }

    fn name(&mut self, message: &str) -> Result<Option<String>> {
        while let Some(line) = self.read_line(message)? {
            if !line.is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn value(&mut self, message: &str) -> Result<Option<f64>> {
        while let Some(line) = self.read_line(message)? {
            match line.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Please type a number")?,
            }
        }
        Ok(None)
    }
}

fn prompt_action(prompter: &mut impl Prompter, choice: MenuChoice) -> Result<Option<MenuAction>> {
    let action = match choice {
        MenuChoice::Define => {
            let Some(name) = prompter.name("Enter variable name:")? else { return Ok(None) };
            let Some(value) = prompter.value("Enter variable value:")? else { return Ok(None) };
            MenuAction::Define { name, value }
        }
        MenuChoice::Retrieve => match prompter.name("Enter variable name to retrieve:")? {
            Some(name) => MenuAction::Retrieve { name },
            None => return Ok(None),
        },
        MenuChoice::Remove => match prompter.name("Enter variable name to remove:")? {
            Some(name) => MenuAction::Remove { name },
            None => return Ok(None),
        },
        MenuChoice::List => MenuAction::List,
        MenuChoice::Exit => MenuAction::Exit,
    };

    Ok(Some(action))
}

/// Run the menu until the user picks 5 or the choice input ends.
pub fn run_with(store: &mut VariableStore, prompter: &mut impl Prompter) -> Result<()> {
    loop {
        prompter.say(MENU)?;

        let Some(raw) = prompter.choice()? else {
            prompter.say(&apply(store, MenuAction::Exit))?;
            return Ok(());
        };

        let choice = match raw.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                prompter.say("Invalid choice. Please try again.")?;
                continue;
            }
        };

        // A cancelled follow-up prompt returns to the menu.
        let Some(action) = prompt_action(prompter, choice)? else { continue };

        prompter.say(&apply(store, action))?;

        if choice == MenuChoice::Exit {
            return Ok(());
        }
    }
}

/// Run the menu on stdin, with `inquire` prompts when stdin is a terminal.
pub fn run(store: &mut VariableStore) -> Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        run_with(store, &mut TerminalPrompter)
    } else {
        run_with(store, &mut LinePrompter::new(stdin.lock(), io::stdout()))
    }
}
