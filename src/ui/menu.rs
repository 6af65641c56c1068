use std::io::{BufRead, Write};

use anyhow::Result;

use crate::store::RecordStore;
use crate::table::Table;

use super::helpers::describe;
use super::prompts::{read_channel_patch, read_show_form, read_show_patch};
use super::terminal::Console;

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListShows,
    ListChannels,
    AddShow,
    AddChannel,
    DeleteShow,
    DeleteChannel,
    EditShow,
    EditChannel,
    BroadcastSummary,
    ShowsOnDay,
    LongestShows,
    ShortestShows,
    AverageDuration,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 14] = [
        MenuChoice::ListShows,
        MenuChoice::ListChannels,
        MenuChoice::AddShow,
        MenuChoice::AddChannel,
        MenuChoice::DeleteShow,
        MenuChoice::DeleteChannel,
        MenuChoice::EditShow,
        MenuChoice::EditChannel,
        MenuChoice::BroadcastSummary,
        MenuChoice::ShowsOnDay,
        MenuChoice::LongestShows,
        MenuChoice::ShortestShows,
        MenuChoice::AverageDuration,
        MenuChoice::Exit,
    ];

    /// Map a typed menu number (1-based) to its entry.
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Text printed next to the entry's number.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ListShows => "Show all shows",
            MenuChoice::ListChannels => "Show all channels",
            MenuChoice::AddShow => "Add show",
            MenuChoice::AddChannel => "Add channel",
            MenuChoice::DeleteShow => "Delete show",
            MenuChoice::DeleteChannel => "Delete channel",
            MenuChoice::EditShow => "Edit show",
            MenuChoice::EditChannel => "Edit channel",
            MenuChoice::BroadcastSummary => "Make a Broadcast Summary",
            MenuChoice::ShowsOnDay => "Show shows on a specific day",
            MenuChoice::LongestShows => "Show longest show",
            MenuChoice::ShortestShows => "Show shortest show",
            MenuChoice::AverageDuration => "Average show duration",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// The numbered menu loop. Owns the store for the lifetime of the session
/// and reports every store error as a status line.
pub struct Menu<R, W> {
    store: RecordStore,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: RecordStore, console: Console<R, W>) -> Self {
        Self { store, console }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Hand back the store and console once the loop is done.
    pub fn into_parts(self) -> (RecordStore, Console<R, W>) {
        (self.store, self.console)
    }

    /// Show the menu until the user exits or input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render_menu()?;
            let input = self.console.prompt("Enter your choice: ")?;
            if self.console.at_eof() && input.trim().is_empty() {
                break;
            }

            match input.trim().parse::<usize>() {
                Err(_) => self.console.error("Invalid input. Please enter a number.")?,
                Ok(number) => match MenuChoice::from_number(number) {
                    Some(MenuChoice::Exit) => {
                        self.console.clear()?;
                        self.console.line("Exiting program. Goodbye!")?;
                        break;
                    }
                    Some(choice) => {
                        self.console.clear()?;
                        self.dispatch(choice)?;
                    }
                    None => self.console.error("Invalid choice. Please try again.")?,
                },
            }

            if self.console.at_eof() {
                break;
            }
            self.console.pause()?;
            self.console.clear()?;
        }
        Ok(())
    }

    fn render_menu(&mut self) -> Result<()> {
        self.console.line("\n===== TV Program Management System =====")?;
        for (idx, choice) in MenuChoice::ALL.iter().enumerate() {
            self.console.line(format!("{}. {}", idx + 1, choice.label()))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::ListShows => self.list_shows(),
            MenuChoice::ListChannels => self.list_channels(),
            MenuChoice::AddShow => self.add_show(),
            MenuChoice::AddChannel => self.add_channel(),
            MenuChoice::DeleteShow => self.delete_show(),
            MenuChoice::DeleteChannel => self.delete_channel(),
            MenuChoice::EditShow => self.edit_show(),
            MenuChoice::EditChannel => self.edit_channel(),
            MenuChoice::BroadcastSummary => self.broadcast_summary(),
            MenuChoice::ShowsOnDay => self.shows_on_day(),
            MenuChoice::LongestShows => self.extreme_shows(true),
            MenuChoice::ShortestShows => self.extreme_shows(false),
            MenuChoice::AverageDuration => self.average_duration(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_table(&mut self, table: &Table) -> Result<()> {
        for line in table.lines() {
            self.console.line(line)?;
        }
        Ok(())
    }

    fn list_shows(&mut self) -> Result<()> {
        if self.store.shows().is_empty() {
            return self.console.line("No shows available.");
        }
        let table = self.store.list_shows();
        self.console.line("")?;
        self.print_table(&table)
    }

    fn list_channels(&mut self) -> Result<()> {
        if self.store.channels().is_empty() {
            return self.console.line("No channels available.");
        }
        let table = self.store.list_channels();
        self.print_table(&table)
    }

    fn add_show(&mut self) -> Result<()> {
        let Some(form) = read_show_form(&mut self.console)? else {
            return Ok(());
        };
        match self.store.add_show(form.draft()) {
            Ok(()) => self.console.info("Show added successfully."),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn add_channel(&mut self) -> Result<()> {
        let name = self.console.prompt("Enter channel name: ")?;
        let country = self.console.prompt("Enter origin country: ")?;
        match self.store.add_channel(name.trim(), country.trim()) {
            Ok(code) => self
                .console
                .info(&format!("Channel added successfully with ID: {code}")),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn delete_show(&mut self) -> Result<()> {
        let name = self.console.prompt("Enter name of show to delete: ")?;
        match self.store.delete_show(name.trim()) {
            Ok(_) => self.console.info("Show deleted successfully."),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn delete_channel(&mut self) -> Result<()> {
        let name = self.console.prompt("Enter name of channel to delete: ")?;
        match self.store.delete_channel(name.trim()) {
            Ok(_) => self.console.info("Channel deleted successfully."),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn edit_show(&mut self) -> Result<()> {
        let name = self.console.prompt("Enter name of show to edit: ")?;
        let name = name.trim();
        let current = match self.store.locate_show(name) {
            Ok(show) => show.display_name(),
            Err(err) => return self.console.error(&describe(&err)),
        };

        self.console.line(format!("Editing show: {current}"))?;
        self.console
            .line("Enter new details (leave blank to keep current value):")?;
        let patch = read_show_patch(&mut self.console)?;

        match self.store.edit_show(name, patch) {
            Ok(()) => self.console.info("Show updated successfully."),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn edit_channel(&mut self) -> Result<()> {
        let name = self.console.prompt("Enter name of channel to edit: ")?;
        let name = name.trim();
        let current = match self.store.locate_channel(name) {
            Ok(channel) => channel.display_name(),
            Err(err) => return self.console.error(&describe(&err)),
        };

        self.console.line(format!("Editing channel: {current}"))?;
        self.console
            .line("Enter new details (leave blank to keep current value):")?;
        let patch = read_channel_patch(&mut self.console)?;

        match self.store.edit_channel(name, patch) {
            Ok(()) => self.console.info("Channel updated successfully."),
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn broadcast_summary(&mut self) -> Result<()> {
        match self.store.broadcast_summary() {
            Ok(None) => self.console.line("No channels or shows available."),
            Ok(Some(_)) => {
                let path = self.store.files().summary.display().to_string();
                self.console
                    .info(&format!("Broadcast summary has been written to {path}"))
            }
            Err(err) => self.console.error(&describe(&err)),
        }
    }

    fn shows_on_day(&mut self) -> Result<()> {
        let day = self.console.prompt("Enter day of week: ")?;
        let day = day.trim();
        let shows = self.store.shows_on_day(day);
        if shows.is_empty() {
            return self.console.line("No shows found for the specified day.");
        }
        let table = Table::shows_without_day(shows);
        self.console.line(format!("\nShows on {day}:"))?;
        self.print_table(&table)
    }

    fn extreme_shows(&mut self, longest: bool) -> Result<()> {
        let extreme = if longest {
            self.store.longest_shows()
        } else {
            self.store.shortest_shows()
        };
        let Some(extreme) = extreme else {
            return self.console.line("No shows available.");
        };

        let title = format!(
            "\nShows with the {} duration ({} minutes):",
            if longest { "longest" } else { "shortest" },
            extreme.minutes
        );
        let table = Table::shows(extreme.shows);
        self.console.line(title)?;
        self.print_table(&table)
    }

    fn average_duration(&mut self) -> Result<()> {
        let category = self
            .console
            .prompt("Enter category name (leave blank for all shows): ")?;
        let category = category.trim();

        match self.store.average_duration(Some(category)) {
            Some(average) if category.is_empty() => self
                .console
                .line(format!("Average duration of all shows: {average:.2} minutes.")),
            Some(average) => self.console.line(format!(
                "Average duration of shows in category {category}: {average:.2} minutes."
            )),
            None if category.is_empty() => self.console.line("No shows available."),
            None => self
                .console
                .line(format!("No shows available in the {category} category.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_are_one_based() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::ListShows));
        assert_eq!(MenuChoice::from_number(14), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(15), None);
    }
}
