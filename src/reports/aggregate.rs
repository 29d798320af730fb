//! Bill aggregation
//!
//! Groups bill entries for the two report layouts and computes the 10% tax
//! withholding. Tax is always a whole number of rupees, rounded half away
//! from zero, and pay is the amount minus that tax.

use std::collections::HashMap;
use std::ops::AddAssign;

use crate::models::{BillEntry, FacultyId, FacultyRecord, Money, MonthRange};

/// Tax withheld from every payment, in percent
pub const TAX_PERCENT: i64 = 10;

/// Tax withheld from `amount`
pub fn tax_on(amount: Money) -> Money {
    amount.percent_whole_rupees(TAX_PERCENT)
}

/// Amount, withheld tax and resulting pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub amount: Money,
    pub tax: Money,
    pub pay: Money,
}

impl Totals {
    /// Totals for a single amount, taxing it on its own
    pub fn taxed(amount: Money) -> Self {
        let tax = tax_on(amount);
        Self {
            amount,
            tax,
            pay: amount - tax,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.amount += other.amount;
        self.tax += other.tax;
        self.pay += other.pay;
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// One bill inside a ledger group, with its own tax
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine {
    pub bill: BillEntry,
    pub totals: Totals,
}

/// Bills sharing a faculty, subject and class
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerGroup {
    pub faculty_id: FacultyId,
    /// Name captured on the group's first bill
    pub faculty_name: String,
    /// Empty when the faculty record no longer exists
    pub pan_number: String,
    pub subject: String,
    pub class_name: String,
    pub lines: Vec<LedgerLine>,
    pub hours: f64,
    /// Sum of the lines; tax is the sum of per-line rounded taxes
    pub subtotal: Totals,
}

/// One faculty member's total over a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyTotal {
    pub faculty_id: FacultyId,
    pub name: String,
    pub bank_name: String,
    pub pan_number: String,
    pub bill_count: usize,
    /// Tax computed once on the faculty's summed amount
    pub totals: Totals,
}

/// Per-faculty totals for a period plus the grand total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotals {
    pub range: MonthRange,
    pub faculty: Vec<FacultyTotal>,
    pub grand_total: Totals,
}

fn index_faculty(faculty: &[FacultyRecord]) -> HashMap<&FacultyId, &FacultyRecord> {
    faculty.iter().map(|f| (&f.id, f)).collect()
}

/// Group bills by (faculty, subject, class) for the detailed ledger
///
/// Groups appear in the order their first bill appears in `bills`, and bills
/// keep their relative order inside a group. A bill whose faculty is not in
/// `faculty` is kept with an empty PAN.
pub fn group_for_ledger(bills: &[BillEntry], faculty: &[FacultyRecord]) -> Vec<LedgerGroup> {
    let lookup = index_faculty(faculty);
    let mut positions: HashMap<(&FacultyId, &str, &str), usize> = HashMap::new();
    let mut groups: Vec<LedgerGroup> = Vec::new();

    for bill in bills {
        let key = (&bill.faculty_id, bill.subject.as_str(), bill.class_name.as_str());
        let index = *positions.entry(key).or_insert_with(|| {
            groups.push(LedgerGroup {
                faculty_id: bill.faculty_id.clone(),
                faculty_name: bill.faculty_name.clone(),
                pan_number: lookup
                    .get(&bill.faculty_id)
                    .map(|f| f.pan_number.clone())
                    .unwrap_or_default(),
                subject: bill.subject.clone(),
                class_name: bill.class_name.clone(),
                lines: Vec::new(),
                hours: 0.0,
                subtotal: Totals::default(),
            });
            groups.len() - 1
        });

        let group = &mut groups[index];
        let totals = Totals::taxed(bill.total_amount);
        group.hours += bill.total_hours;
        group.subtotal += totals;
        group.lines.push(LedgerLine {
            bill: bill.clone(),
            totals,
        });
    }

    groups
}

/// Sum each faculty member's bills within `range`
///
/// An empty range (end before start) selects nothing. Bills whose faculty is
/// not in `faculty` are skipped. Faculty appear in the order of their first
/// matching bill.
pub fn group_for_personal_summary(
    bills: &[BillEntry],
    faculty: &[FacultyRecord],
    range: MonthRange,
) -> PeriodTotals {
    let lookup = index_faculty(faculty);
    let mut positions: HashMap<&FacultyId, usize> = HashMap::new();
    let mut sums: Vec<(&FacultyRecord, Money, usize)> = Vec::new();

    for bill in bills.iter().filter(|b| range.contains(b.month, b.year)) {
        let Some(&record) = lookup.get(&bill.faculty_id) else {
            continue;
        };
        let index = *positions.entry(&bill.faculty_id).or_insert_with(|| {
            sums.push((record, Money::zero(), 0));
            sums.len() - 1
        });
        sums[index].1 += bill.total_amount;
        sums[index].2 += 1;
    }

    let faculty: Vec<FacultyTotal> = sums
        .into_iter()
        .map(|(record, amount, bill_count)| FacultyTotal {
            faculty_id: record.id.clone(),
            name: record.name.clone(),
            bank_name: record.bank_name.clone(),
            pan_number: record.pan_number.clone(),
            bill_count,
            totals: Totals::taxed(amount),
        })
        .collect();

    let grand_total = faculty.iter().map(|f| f.totals).sum();

    PeriodTotals {
        range,
        faculty,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::fixtures::bill;
    use crate::models::faculty::fixtures::record;
    use crate::models::Month;

    fn rupees(n: i64) -> Money {
        Money::from_rupees(n)
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        assert_eq!(tax_on(rupees(4505)), rupees(451));
        assert_eq!(tax_on(rupees(4504)), rupees(450));
        assert_eq!(tax_on(rupees(5000)), rupees(500));
        assert_eq!(tax_on(Money::zero()), Money::zero());
    }

    #[test]
    fn test_ledger_single_group() {
        let a = record("FAC-A", "Asha Rao");
        let bills = vec![
            bill(&a, "DS", "Theory", 5000, Month::March, 2024),
            bill(&a, "DS", "Theory", 3000, Month::April, 2024),
            bill(&a, "DS", "Theory", 2000, Month::May, 2024),
        ];

        let groups = group_for_ledger(&bills, &[a.clone()]);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.lines.len(), 3);
        assert_eq!(group.pan_number, a.pan_number);
        assert_eq!(
            group.subtotal,
            Totals {
                amount: rupees(10000),
                tax: rupees(1000),
                pay: rupees(9000)
            }
        );
        let amounts: Vec<_> = group.lines.iter().map(|l| l.totals.amount).collect();
        assert_eq!(amounts, vec![rupees(5000), rupees(3000), rupees(2000)]);
    }

    #[test]
    fn test_ledger_groups_in_first_encountered_order() {
        let a = record("FAC-A", "Asha");
        let b = record("FAC-B", "Vikram");
        let bills = vec![
            bill(&b, "OS", "Lab", 100, Month::March, 2024),
            bill(&a, "DS", "Theory", 200, Month::March, 2024),
            bill(&b, "OS", "Lab", 300, Month::April, 2024),
            bill(&a, "DS", "Lab", 400, Month::March, 2024),
        ];

        let groups = group_for_ledger(&bills, &[a, b]);
        let keys: Vec<_> = groups
            .iter()
            .map(|g| (g.faculty_name.as_str(), g.class_name.as_str(), g.lines.len()))
            .collect();
        assert_eq!(
            keys,
            vec![("Vikram", "Lab", 2), ("Asha", "Theory", 1), ("Asha", "Lab", 1)]
        );
    }

    #[test]
    fn test_ledger_subtotal_sums_rounded_taxes() {
        let a = record("FAC-A", "Asha");
        let bills = vec![
            bill(&a, "DS", "Theory", 4505, Month::March, 2024),
            bill(&a, "DS", "Theory", 4505, Month::April, 2024),
        ];

        let group = &group_for_ledger(&bills, &[a])[0];
        // 451 + 451, not round(901)
        assert_eq!(group.subtotal.tax, rupees(902));
        assert_eq!(group.subtotal.pay, rupees(9010) - rupees(902));
        let line_pay: Money = group.lines.iter().map(|l| l.totals.pay).sum();
        assert_eq!(group.subtotal.pay, line_pay);
    }

    #[test]
    fn test_oversized_bill_does_not_overflow() {
        use crate::models::bill::fixtures::draft;

        let a = record("FAC-A", "Asha");
        let huge = BillEntry::new(&a, draft("DS", "Theory", 1e20, Month::March, 2024), rupees(500));
        assert_eq!(huge.total_amount, Money::from_paise(i64::MAX));

        let groups = group_for_ledger(&[huge.clone()], &[a.clone()]);
        let subtotal = groups[0].subtotal;
        assert!(subtotal.tax.is_positive());
        assert_eq!(subtotal.pay, subtotal.amount - subtotal.tax);

        let range = MonthRange::new(Month::January, Month::December, 2024);
        let summary = group_for_personal_summary(&[huge.clone(), huge], &[a], range);
        assert_eq!(summary.grand_total.amount, Money::from_paise(i64::MAX));
    }

    #[test]
    fn test_ledger_keeps_unknown_faculty() {
        let ghost = record("FAC-GONE", "Former Faculty");
        let bills = vec![bill(&ghost, "DS", "Theory", 1000, Month::March, 2024)];

        let groups = group_for_ledger(&bills, &[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pan_number, "");
        assert_eq!(groups[0].faculty_name, "Former Faculty");
    }

    #[test]
    fn test_ledger_empty() {
        assert!(group_for_ledger(&[], &[]).is_empty());
    }

    #[test]
    fn test_summary_sums_across_months() {
        let a = record("FAC-A", "Asha");
        let bills = vec![
            bill(&a, "DS", "Theory", 4500, Month::March, 2024),
            bill(&a, "OS", "Lab", 5500, Month::April, 2024),
        ];

        let summary = group_for_personal_summary(
            &bills,
            &[a],
            MonthRange::new(Month::March, Month::April, 2024),
        );

        assert_eq!(summary.faculty.len(), 1);
        assert_eq!(summary.faculty[0].bill_count, 2);
        let expected = Totals {
            amount: rupees(10000),
            tax: rupees(1000),
            pay: rupees(9000),
        };
        assert_eq!(summary.faculty[0].totals, expected);
        assert_eq!(summary.grand_total, expected);
    }

    #[test]
    fn test_summary_taxes_the_faculty_total() {
        let a = record("FAC-A", "Asha");
        let bills = vec![
            bill(&a, "DS", "Theory", 4505, Month::March, 2024),
            bill(&a, "DS", "Theory", 4505, Month::March, 2024),
        ];

        let summary =
            group_for_personal_summary(&bills, &[a], MonthRange::single(Month::March, 2024));
        assert_eq!(summary.faculty[0].totals.tax, rupees(901));
    }

    #[test]
    fn test_summary_single_month_and_year_filter() {
        let a = record("FAC-A", "Asha");
        let bills = vec![
            bill(&a, "DS", "Theory", 1000, Month::February, 2024),
            bill(&a, "DS", "Theory", 2000, Month::March, 2024),
            bill(&a, "DS", "Theory", 4000, Month::March, 2023),
            bill(&a, "DS", "Theory", 8000, Month::April, 2024),
        ];

        let summary =
            group_for_personal_summary(&bills, &[a], MonthRange::single(Month::March, 2024));
        assert_eq!(summary.grand_total.amount, rupees(2000));
    }

    #[test]
    fn test_summary_reversed_range_is_empty() {
        let a = record("FAC-A", "Asha");
        let bills: Vec<_> = Month::ALL
            .iter()
            .map(|m| bill(&a, "DS", "Theory", 1000, *m, 2024))
            .collect();

        let summary = group_for_personal_summary(
            &bills,
            &[a],
            MonthRange::new(Month::May, Month::January, 2024),
        );
        assert!(summary.faculty.is_empty());
        assert_eq!(summary.grand_total, Totals::default());
    }

    #[test]
    fn test_summary_skips_unknown_faculty() {
        let a = record("FAC-A", "Asha");
        let ghost = record("FAC-GONE", "Ghost");
        let bills = vec![
            bill(&ghost, "DS", "Theory", 7000, Month::March, 2024),
            bill(&a, "DS", "Theory", 1000, Month::March, 2024),
        ];

        let summary =
            group_for_personal_summary(&bills, &[a], MonthRange::single(Month::March, 2024));
        assert_eq!(summary.faculty.len(), 1);
        assert_eq!(summary.faculty[0].name, "Asha");
        assert_eq!(summary.grand_total.amount, rupees(1000));
    }

    #[test]
    fn test_summary_first_encountered_order() {
        let a = record("FAC-A", "Asha");
        let b = record("FAC-B", "Vikram");
        let bills = vec![
            bill(&b, "OS", "Lab", 100, Month::March, 2024),
            bill(&a, "DS", "Theory", 100, Month::March, 2024),
            bill(&b, "OS", "Lab", 100, Month::March, 2024),
        ];

        let summary =
            group_for_personal_summary(&bills, &[a, b], MonthRange::single(Month::March, 2024));
        let names: Vec<_> = summary.faculty.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Vikram", "Asha"]);
    }

    #[test]
    fn test_summary_empty_input() {
        let summary =
            group_for_personal_summary(&[], &[], MonthRange::new(Month::January, Month::December, 2024));
        assert!(summary.faculty.is_empty());
        assert_eq!(summary.grand_total, Totals::default());
    }
}
