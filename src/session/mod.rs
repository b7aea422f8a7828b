//! Interactive session state machine
//!
//! The control loop behind the whole application: main menu, ledger
//! selection, record entry/deletion, ledger lifecycle, views, and charts.
//! Every data prompt honors the `esc` cancel token, which unwinds straight
//! back to the main menu from any depth; store failures abort only the
//! current operation unless the store itself has gone bad.
//!
//! Prompt retries are loops, not recursive calls, so a long session never
//! grows the stack.

pub mod console;

pub use console::{Console, Flow, Interrupt, CANCEL_TOKEN};

use std::io::{BufRead, Write};

use crate::display::{
    format_balance_table, format_bar_chart, format_ledger_list, format_ledger_table,
    format_pie_chart,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Record};
use crate::report::{
    balance_bar, expense_pie, expense_stacked_bar, BalanceSummary, CategoryPivot, CategoryTotals,
    Granularity,
};
use crate::repository::{LedgerSelection, LedgerView};
use crate::store::LedgerStore;
use crate::validate;

const MENU_ITEMS: [&str; 7] = [
    "Insert Record",
    "Delete Record",
    "Create Ledger",
    "Delete Ledger",
    "View Ledger",
    "View Chart",
    "Exit",
];

const CHART_ITEMS: [&str; 4] = [
    "Expense Summary - Pie",
    "Expense Summary - Bar",
    "Balance Summary",
    "All",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Insert,
    Delete,
    Create,
    DeleteLedger,
    View,
    Chart,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartChoice {
    Pie,
    StackedBar,
    Balance,
    All,
}

/// What to do after an insert/delete round
enum EditNext {
    SameLedger,
    SwitchLedger,
    Done,
}

/// What to do after a view/chart/delete-ledger round
enum ViewNext {
    Another,
    Done,
}

/// The interactive session, generic over its console I/O
pub struct Session<'a, R, W> {
    store: &'a dyn LedgerStore,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a dyn LedgerStore, console: Console<R, W>) -> Self {
        Self { store, console }
    }

    /// Run the main-menu loop until the user picks Exit
    ///
    /// Only fatal errors (store gone bad, terminal gone) escape; cancels and
    /// operation-scoped failures land back at the menu.
    pub fn run(&mut self) -> LedgerResult<()> {
        loop {
            let choice = match self.main_menu() {
                Ok(choice) => choice,
                Err(Interrupt::Io(err)) => return Err(err.into()),
                Err(Interrupt::Failed(err)) => return Err(err),
                Err(Interrupt::Cancelled) => continue,
            };

            let flow = match choice {
                MenuChoice::Exit => return Ok(()),
                MenuChoice::Insert => self.insert_flow(),
                MenuChoice::Delete => self.delete_flow(),
                MenuChoice::Create => self.create_flow(),
                MenuChoice::DeleteLedger => self.delete_ledger_flow(),
                MenuChoice::View => self.view_flow(),
                MenuChoice::Chart => self.chart_flow(),
            };

            match flow {
                Ok(()) | Err(Interrupt::Cancelled) => {}
                Err(Interrupt::Failed(err)) if err.aborts_operation_only() => {
                    self.console.line(&format!("\n{}\n", err))?;
                }
                Err(Interrupt::Failed(err)) => return Err(err),
                Err(Interrupt::Io(err)) => return Err(err.into()),
            }
            self.console.blank()?;
        }
    }

    fn main_menu(&mut self) -> Flow<MenuChoice> {
        loop {
            self.console.line("Main Menu")?;
            for (index, item) in MENU_ITEMS.iter().enumerate() {
                self.console.line(&format!("{}: {}", index + 1, item))?;
            }
            let answer = self.console.ask("\nPlease select: ")?;
            match validate::parse_choice(&answer, MENU_ITEMS.len()) {
                Ok(1) => return Ok(MenuChoice::Insert),
                Ok(2) => return Ok(MenuChoice::Delete),
                Ok(3) => return Ok(MenuChoice::Create),
                Ok(4) => return Ok(MenuChoice::DeleteLedger),
                Ok(5) => return Ok(MenuChoice::View),
                Ok(6) => return Ok(MenuChoice::Chart),
                Ok(_) => return Ok(MenuChoice::Exit),
                Err(_) => self.console.line("\nInvalid input, please re-select\n")?,
            }
        }
    }

    /// Offer every stored ledger plus `All Ledgers`, with choice 0 backing
    /// out to the main menu
    fn select_ledger(&mut self) -> Flow<LedgerSelection> {
        loop {
            let names = self.store.list_ledgers()?;
            self.console.line("0: Go Back to Main Menu")?;
            for (index, name) in names.iter().enumerate() {
                self.console.line(&format!("{}: {}", index + 1, name))?;
            }
            self.console
                .line(&format!("{}: All Ledgers", names.len() + 1))?;

            let answer = self.console.ask_esc("\nPlease select a ledger: ")?;
            if answer == "0" {
                return Err(Interrupt::Cancelled);
            }
            match validate::parse_choice(&answer, names.len() + 1) {
                Ok(index) if index <= names.len() => {
                    return Ok(LedgerSelection::Named(names[index - 1].clone()))
                }
                Ok(_) => return Ok(LedgerSelection::All),
                Err(_) => self.console.line("\nInvalid input, please re-select\n")?,
            }
        }
    }

    fn select_category(&mut self) -> Flow<Category> {
        loop {
            self.console.line("Category List")?;
            for (index, category) in Category::SCHEMA.iter().enumerate() {
                self.console
                    .line(&format!("{}: {}", index + 1, category.label()))?;
            }
            let answer = self.console.ask_esc("Category: ")?;
            match validate::parse_choice(&answer, Category::SCHEMA.len()) {
                Ok(index) => return Ok(Category::SCHEMA[index - 1]),
                Err(_) => self.console.line("\nInvalid input, please re-select\n")?,
            }
        }
    }

    fn select_chart(&mut self) -> Flow<ChartChoice> {
        loop {
            self.console.line("Chart List")?;
            for (index, item) in CHART_ITEMS.iter().enumerate() {
                self.console.line(&format!("{}: {}", index + 1, item))?;
            }
            let answer = self.console.ask_esc("Please select: ")?;
            match validate::parse_choice(&answer, CHART_ITEMS.len()) {
                Ok(1) => return Ok(ChartChoice::Pie),
                Ok(2) => return Ok(ChartChoice::StackedBar),
                Ok(3) => return Ok(ChartChoice::Balance),
                Ok(_) => return Ok(ChartChoice::All),
                Err(_) => self.console.line("\nInvalid input, please re-select\n")?,
            }
        }
    }

    /// Load a fresh view and print it
    fn show_table(&mut self, selection: &LedgerSelection) -> Flow<LedgerView> {
        let view = LedgerView::load(self.store, selection)?;
        self.console.show(&format_ledger_table(&view))?;
        Ok(view)
    }

    fn show_ledger_list(&mut self) -> Flow<()> {
        let names = self.store.list_ledgers()?;
        self.console.show(&format_ledger_list(&names))?;
        Ok(())
    }

    fn insert_flow(&mut self) -> Flow<()> {
        let mut selection = self.select_ledger()?;
        loop {
            // The union view is read-only; selecting it just shows the table
            if let LedgerSelection::Named(name) = selection.clone() {
                self.console.line("Original Ledger")?;
                self.show_table(&selection)?;

                self.console.line("\nEnter record")?;
                let date = self.console.prompt_date("Date (YYYYmmdd): ")?;
                let category = self.select_category()?;
                let amount = self.console.prompt_amount("Amount: ")?;
                let note = self.console.ask_esc("Note: ")?;

                self.store
                    .append(&name, Record::new(date, category, amount, note))?;
            }

            self.console.line("\nUpdated Ledger")?;
            self.show_table(&selection)?;

            match self.continue_edit()? {
                EditNext::SameLedger => {}
                EditNext::SwitchLedger => selection = self.select_ledger()?,
                EditNext::Done => return Ok(()),
            }
        }
    }

    fn delete_flow(&mut self) -> Flow<()> {
        let mut selection = self.select_ledger()?;
        loop {
            if let LedgerSelection::Named(name) = selection.clone() {
                self.console.line("Original Ledger")?;
                let view = self.show_table(&selection)?;

                if view.is_empty() {
                    self.console.line("\nNo records to delete.")?;
                } else {
                    loop {
                        let answer =
                            self.console.ask_esc("\nSelect row number to delete: ")?;
                        match validate::parse_choice(&answer, view.len()) {
                            Ok(rank) => {
                                // The mapping was fixed when the view loaded
                                let position = view.position_of_rank(rank).ok_or_else(|| {
                                    Interrupt::Failed(LedgerError::row_not_found(rank as u32))
                                })?;
                                self.store.delete_row(&name, position)?;
                                break;
                            }
                            Err(_) => {
                                self.console.line("\nInvalid input, please re-enter")?
                            }
                        }
                    }
                }
            }

            self.console.line("\nUpdated Ledger")?;
            self.show_table(&selection)?;

            match self.continue_edit()? {
                EditNext::SameLedger => {}
                EditNext::SwitchLedger => selection = self.select_ledger()?,
                EditNext::Done => return Ok(()),
            }
        }
    }

    fn create_flow(&mut self) -> Flow<()> {
        loop {
            self.console.line("Original Ledger List")?;
            self.show_ledger_list()?;

            let name = loop {
                let answer = self.console.ask_esc("New Ledger Name: ")?;
                if answer.is_empty() {
                    self.console.line("\nInvalid input, please re-enter\n")?;
                } else {
                    break answer;
                }
            };
            self.store.create_ledger(&name)?;

            self.console.line("\nUpdated Ledger List")?;
            self.show_ledger_list()?;

            if !self.continue_process()? {
                return Ok(());
            }
        }
    }

    fn delete_ledger_flow(&mut self) -> Flow<()> {
        let mut selection = self.select_ledger()?;
        loop {
            if let LedgerSelection::Named(name) = selection.clone() {
                self.store.delete_ledger(&name)?;
                self.console
                    .line(&format!("{} has been deleted...", name))?;
            }

            self.console.line("\nUpdated Ledger List")?;
            self.show_ledger_list()?;

            match self.continue_view()? {
                ViewNext::Another => selection = self.select_ledger()?,
                ViewNext::Done => return Ok(()),
            }
        }
    }

    fn view_flow(&mut self) -> Flow<()> {
        let mut selection = self.select_ledger()?;
        loop {
            let view = self.show_table(&selection)?;

            let summary = BalanceSummary::from_records(view.records());
            let (title, summary) = if selection.is_all() {
                ("Monthly Balance Summary".to_string(), summary.with_total())
            } else {
                (format!("{} Balance Summary", selection.label()), summary)
            };
            self.console.line(&format!("\n{}", title))?;
            self.console.show(&format_balance_table(&summary))?;

            match self.continue_view()? {
                ViewNext::Another => selection = self.select_ledger()?,
                ViewNext::Done => return Ok(()),
            }
        }
    }

    fn chart_flow(&mut self) -> Flow<()> {
        let mut selection = self.select_ledger()?;
        let mut chart = self.select_chart()?;
        loop {
            let view = self.show_table(&selection)?;
            self.render_charts(&selection, chart, &view)?;
            self.console.pause()?;

            match self.continue_view()? {
                ViewNext::Another => {
                    selection = self.select_ledger()?;
                    chart = self.select_chart()?;
                }
                ViewNext::Done => return Ok(()),
            }
        }
    }

    fn render_charts(
        &mut self,
        selection: &LedgerSelection,
        choice: ChartChoice,
        view: &LedgerView,
    ) -> Flow<()> {
        let granularity = if selection.is_all() {
            Granularity::Monthly
        } else {
            Granularity::Daily
        };
        let pivot = CategoryPivot::from_records(view.records(), granularity);

        if matches!(choice, ChartChoice::Pie | ChartChoice::All) {
            let totals = CategoryTotals::from_pivot(&pivot);
            self.console.blank()?;
            self.console
                .show(&format_pie_chart(&expense_pie(&totals, selection)))?;
        }
        if matches!(choice, ChartChoice::StackedBar | ChartChoice::All) {
            self.console.blank()?;
            self.console
                .show(&format_bar_chart(&expense_stacked_bar(&pivot, selection)))?;
        }
        if matches!(choice, ChartChoice::Balance | ChartChoice::All) {
            let summary = BalanceSummary::from_records(view.records());
            self.console.blank()?;
            self.console
                .show(&format_bar_chart(&balance_bar(&summary, selection)))?;
        }
        self.console.blank()?;
        Ok(())
    }

    fn continue_edit(&mut self) -> Flow<EditNext> {
        loop {
            let answer = self.console.ask(
                "\nPress 1 to edit another record; press 2 to switch a ledger; press 3 to exit: ",
            )?;
            match answer.as_str() {
                "1" => return Ok(EditNext::SameLedger),
                "2" => return Ok(EditNext::SwitchLedger),
                "3" => return Ok(EditNext::Done),
                _ => {}
            }
        }
    }

    fn continue_view(&mut self) -> Flow<ViewNext> {
        loop {
            let answer = self
                .console
                .ask("\nPress 1 to select another ledger; press 2 to exit: ")?;
            match answer.as_str() {
                "1" => return Ok(ViewNext::Another),
                "2" => return Ok(ViewNext::Done),
                _ => {}
            }
        }
    }

    fn continue_process(&mut self) -> Flow<bool> {
        loop {
            let answer = self
                .console
                .ask("\nPress 1 to continue; press 2 to exit: ")?;
            match answer.as_str() {
                "1" => return Ok(true),
                "2" => return Ok(false),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::store::JsonStore;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn empty_store() -> (TempDir, JsonStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::open(temp_dir.path().join("expense.json")).unwrap();
        (temp_dir, store)
    }

    fn seeded_store() -> (TempDir, JsonStore) {
        let (temp_dir, store) = empty_store();
        store.create_ledger("March").unwrap();
        store
            .append(
                "March",
                Record::new(
                    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                    Category::Grocery,
                    Money::from_cents(4500),
                    "market",
                ),
            )
            .unwrap();
        store
            .append(
                "March",
                Record::new(
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    Category::Income,
                    Money::from_cents(250000),
                    "salary",
                ),
            )
            .unwrap();
        store
            .append(
                "March",
                Record::new(
                    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                    Category::Rent,
                    Money::from_cents(120000),
                    "march rent",
                ),
            )
            .unwrap();
        (temp_dir, store)
    }

    fn run_script(store: &JsonStore, script: &str) -> String {
        let mut output: Vec<u8> = Vec::new();
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), &mut output);
        let mut session = Session::new(store, console);
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_from_main_menu() {
        let (_temp_dir, store) = empty_store();
        let output = run_script(&store, "7\n");
        assert!(output.contains("Main Menu"));
        assert!(output.contains("7: Exit"));
    }

    #[test]
    fn test_invalid_menu_choice_redisplays() {
        let (_temp_dir, store) = empty_store();
        let output = run_script(&store, "9\n7\n");
        assert!(output.contains("Invalid input, please re-select"));
        assert!(output.matches("Main Menu").count() >= 2);
    }

    #[test]
    fn test_insert_flow_appends_signed_record() {
        let (_temp_dir, store) = empty_store();
        store.create_ledger("March").unwrap();

        // Insert -> ledger 1 -> date, category 4 (rent), amount, note ->
        // continue 3 -> Exit
        run_script(&store, "1\n1\n20240305\n4\n1200\nmarch rent\n3\n7\n");

        let rows = store.read("March").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, Category::Rent);
        assert_eq!(rows[0].amount.cents(), -120000);
        assert_eq!(rows[0].note, "march rent");
    }

    #[test]
    fn test_cancel_mid_insert_appends_nothing() {
        let (_temp_dir, store) = empty_store();
        store.create_ledger("March").unwrap();

        // esc at the category prompt, after the date was accepted
        let output = run_script(&store, "1\n1\n20240305\nesc\n7\n");

        assert!(store.read("March").unwrap().is_empty());
        // Back at the main menu after the cancel
        assert!(output.matches("Main Menu").count() >= 2);
    }

    #[test]
    fn test_delete_flow_removes_ranked_row() {
        let (_temp_dir, store) = seeded_store();

        // Delete -> ledger 1 -> rank 2 (march rent after sorting) ->
        // continue 3 -> Exit
        run_script(&store, "2\n1\n2\n3\n7\n");

        let rows = store.read("March").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.note != "march rent"));
    }

    #[test]
    fn test_delete_against_all_ledgers_is_view_only() {
        let (_temp_dir, store) = seeded_store();

        // Delete -> All Ledgers (index 2) -> continue 3 -> Exit
        let output = run_script(&store, "2\n2\n3\n7\n");

        assert_eq!(store.read("March").unwrap().len(), 3);
        assert!(!output.contains("Select row number"));
        assert!(output.contains("Updated Ledger"));
    }

    #[test]
    fn test_create_and_delete_ledger_flows() {
        let (_temp_dir, store) = empty_store();

        // Create "Summer", stop; then delete it (ledger 1), stop; Exit
        let output = run_script(&store, "3\nSummer\n2\n4\n1\n2\n7\n");

        assert!(output.contains("1: Summer"));
        assert!(output.contains("Summer has been deleted..."));
        assert!(store.list_ledgers().unwrap().is_empty());
    }

    #[test]
    fn test_view_flow_shows_balance_summary() {
        let (_temp_dir, store) = seeded_store();

        // View -> ledger 1 -> exit -> Exit
        let output = run_script(&store, "5\n1\n2\n7\n");

        assert!(output.contains("March Balance Summary"));
        assert!(output.contains("2024-03"));
        // 2500.00 income - 1245.00 expense
        assert!(output.contains("1255.00"));
        assert!(!output.contains("TOTAL"));
    }

    #[test]
    fn test_view_all_ledgers_appends_total() {
        let (_temp_dir, store) = seeded_store();

        // View -> All Ledgers (index 2) -> exit -> Exit
        let output = run_script(&store, "5\n2\n2\n7\n");

        assert!(output.contains("Monthly Balance Summary"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_chart_flow_renders_all_charts() {
        let (_temp_dir, store) = seeded_store();

        // Chart -> ledger 1 -> chart 4 (All) -> Enter to dismiss ->
        // exit -> Exit
        let output = run_script(&store, "6\n1\n4\n\n2\n7\n");

        assert!(output.contains("March Expense Summary by Category"));
        assert!(output.contains("March Daily Expense Summary"));
        assert!(output.contains("March Balance Summary"));
        assert!(output.contains("Press Enter to continue..."));
    }

    #[test]
    fn test_ledger_selection_zero_backs_out() {
        let (_temp_dir, store) = seeded_store();

        // View -> 0 backs out to the menu -> Exit
        let output = run_script(&store, "5\n0\n7\n");
        assert!(output.contains("0: Go Back to Main Menu"));
        assert!(output.matches("Main Menu").count() >= 2);
        assert!(!output.contains("Balance Summary"));
    }
}
