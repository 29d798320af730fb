//! Bill display formatting

use crate::models::{month_year_label, BillEntry};
use crate::reports::sheet::format_quantity;
use crate::services::BillStats;

/// Format bills as a register, one line per bill
pub fn format_bill_list(bills: &[BillEntry], currency_symbol: &str) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let mut output = format!(
        "{:<13}  {:<20}  {:<20}  {:<14}  {:<6}  {:>6}  {:>10}  {}\n",
        "ID", "Faculty", "Subject", "Class", "Month", "Hours", "Amount", "Status"
    );
    output.push_str(&"-".repeat(112));
    output.push('\n');

    for bill in bills {
        output.push_str(&format!(
            "{:<13}  {:<20}  {:<20}  {:<14}  {:<6}  {:>6}  {:>10}  {}\n",
            bill.id.short(),
            truncate(&bill.faculty_name, 20),
            truncate(&bill.subject, 20),
            truncate(&bill.class_name, 14),
            month_year_label(bill.month, bill.year),
            format_quantity(bill.total_hours),
            bill.total_amount.format_with_symbol(currency_symbol),
            bill.status,
        ));
    }

    let total: crate::models::Money = bills.iter().map(|b| b.total_amount).sum();
    output.push_str(&format!(
        "\n{} bills, total {}",
        bills.len(),
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Format dashboard statistics
pub fn format_bill_stats(stats: &BillStats, currency_symbol: &str) -> String {
    format!(
        "Bills:          {}\n\
         Total Earnings: {}\n\
         Pending:        {} ({})\n\
         Approved:       {}\n\
         Paid:           {} ({})",
        stats.bill_count,
        stats.total_amount.format_with_symbol(currency_symbol),
        stats.pending_count,
        stats.pending_amount.format_with_symbol(currency_symbol),
        stats.approved_count,
        stats.paid_count,
        stats.paid_amount.format_with_symbol(currency_symbol),
    )
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
