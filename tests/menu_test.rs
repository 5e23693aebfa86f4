mod common;

use anyhow::Result;
use common::{expense, ledger_path, test_service};
use impensa::application::ExpenseService;
use impensa::cli::Menu;

/// Run the menu over `input` and return everything it printed
fn run_menu(service: &mut ExpenseService, input: &str) -> Result<String> {
    let mut output = Vec::new();
    Menu::new(service, input.as_bytes(), &mut output).run()?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_menu_add_view_delete_scenario() -> Result<()> {
    let (mut service, temp) = test_service()?;

    let input = "1\n2024-03-05\n42.5\nFood\nlunch\n2\n3\n2024-03-05\n1\n2\n5\n";
    let output = run_menu(&mut service, input)?;

    assert!(output.contains("Expense added successfully!"));
    assert!(output.contains(
        "\nDate: 2024-03-05\n  1. Amount: 42.5, Category: Food, Description: lunch\n"
    ));
    // the delete flow lists the bucket unindented before asking for the number
    assert!(output.contains(
        "1. Amount: 42.5, Category: Food, Description: lunch\nEnter the number of the expense to delete: "
    ));
    assert!(output.contains("Expense deleted successfully!"));

    // the final view happens after the delete
    let after_delete = output.split("Expense deleted successfully!").nth(1).unwrap();
    assert!(after_delete.contains("No expenses recorded."));
    assert!(output.ends_with("Goodbye!\n"));

    assert!(service.ledger().is_empty());
    assert!(ExpenseService::open_path(ledger_path(&temp))?.ledger().is_empty());

    Ok(())
}

#[test]
fn test_menu_lists_all_options() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    let output = run_menu(&mut service, "5\n")?;

    assert_eq!(
        output,
        "\nPersonal Expense Tracker\n\
         1. Add Expense\n\
         2. View Expenses\n\
         3. Delete Expense\n\
         4. View Monthly Summary\n\
         5. Exit\n\
         Choose an option: Goodbye!\n"
    );

    Ok(())
}

#[test]
fn test_menu_invalid_choice_reprompts() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    let output = run_menu(&mut service, "9\n\nabc\n5\n")?;

    assert_eq!(
        output
            .matches("Invalid choice. Please select from 1-5.")
            .count(),
        3
    );
    assert_eq!(output.matches("Choose an option: ").count(), 4);

    Ok(())
}

#[test]
fn test_menu_end_of_input_exits() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    let output = run_menu(&mut service, "")?;
    assert!(output.ends_with("Goodbye!\n"));

    // running out of input mid-operation abandons it
    let output = run_menu(&mut service, "1\n2024-03-05\n")?;
    assert!(output.ends_with("Goodbye!\n"));
    assert!(service.ledger().is_empty());

    Ok(())
}

#[test]
fn test_menu_invalid_date_aborts_add() -> Result<()> {
    let (mut service, temp) = test_service()?;
    let output = run_menu(&mut service, "1\n13/01/2024\n5\n")?;

    assert!(output.contains("Invalid date format! Use YYYY-MM-DD."));
    assert!(!output.contains("Enter expense amount: "));
    assert!(service.ledger().is_empty());
    assert!(!ledger_path(&temp).exists());

    Ok(())
}

#[test]
fn test_menu_invalid_amount_aborts_add() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    let output = run_menu(&mut service, "1\n2024-03-05\nabc\n5\n")?;

    assert!(output.contains("Invalid amount!"));
    assert!(!output.contains("Enter expense category"));
    assert!(service.ledger().is_empty());

    Ok(())
}

#[test]
fn test_menu_blank_date_uses_today() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    run_menu(&mut service, "1\n\n7\n\n\n5\n")?;

    let today = impensa::domain::ExpenseDate::today();
    let entries = service.ledger().bucket(&today).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount, 7.0);
    assert_eq!(entries[0].category, "");
    assert_eq!(entries[0].description, "");

    Ok(())
}

#[test]
fn test_menu_add_trims_text_fields() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    run_menu(&mut service, "1\n2024-03-05\n 9.5 \n  Food  \n lunch \n5\n")?;

    let date = common::parse_date("2024-03-05");
    let entries = service.ledger().bucket(&date).unwrap();
    assert_eq!(entries[0].category, "Food");
    assert_eq!(entries[0].description, "lunch");

    Ok(())
}

#[test]
fn test_menu_delete_unknown_date() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    let output = run_menu(&mut service, "3\n2024-01-01\n5\n")?;

    assert!(output.contains("No expenses recorded."));
    assert!(output.contains("No expenses found for this date."));
    assert!(!output.contains("Enter the number of the expense to delete: "));

    Ok(())
}

#[test]
fn test_menu_delete_rejects_bad_index() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    service.add_expense(expense("2024-03-05", 1.0, "A", ""))?;

    let output = run_menu(&mut service, "3\n2024-03-05\n0\n3\n2024-03-05\n2\n3\n2024-03-05\nx\n5\n")?;

    assert_eq!(output.matches("Invalid number.").count(), 2);
    assert_eq!(output.matches("Invalid input.").count(), 1);
    assert!(!output.contains("Expense deleted successfully!"));
    assert_eq!(service.ledger().entry_count(), 1);

    Ok(())
}

#[test]
fn test_menu_monthly_summary() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    let output = run_menu(&mut service, "4\n5\n")?;
    assert!(output.contains("No expenses to summarize."));

    service.add_expense(expense("2024-01-15", 10.0, "", ""))?;
    service.add_expense(expense("2024-01-20", 5.0, "", ""))?;
    service.add_expense(expense("2024-02-01", 3.0, "", ""))?;

    let output = run_menu(&mut service, "4\n5\n")?;
    assert!(output.contains("\nMonthly Expense Summary:\n2024-01: 15.00\n2024-02: 3.00\n"));

    Ok(())
}
