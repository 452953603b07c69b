//! Text rendering of student records
//!
//! Pure functions; the binary decides where the text goes.

use std::fmt;

use crate::record::Student;

/// Number of payments shown on a report card
pub const RECENT_PAYMENTS: usize = 3;

/// Column header matching [`summary_line`]
pub const SUMMARY_HEADER: &str = "ID\tName\tBranch\tYear\tAvg\tBalance";

/// One roster row: `id  name  branch  Y<year>  Avg:<avg>  Bal:<balance>`
pub fn summary_line(student: &Student) -> String {
    format!(
        "{}\t{}\t{}\tY{}\tAvg:{:.2}\tBal:{:.2}",
        student.id(),
        student.name(),
        student.branch(),
        student.year(),
        student.marks().average(),
        student.fees().balance()
    )
}

/// Full report card for one student
pub fn report_card(student: &Student) -> String {
    ReportCard(student).to_string()
}

/// Report card rendering, usable directly with `write!`/`print!`
pub struct ReportCard<'a>(pub &'a Student);

impl fmt::Display for ReportCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let student = self.0;
        let marks = student.marks();
        let fees = student.fees();

        writeln!(f, "--- REPORT CARD ---")?;
        writeln!(f, "ID: {}", student.id())?;
        writeln!(f, "Name: {}", student.name())?;
        writeln!(f, "Branch: {}", student.branch())?;
        writeln!(f, "Year: {}", student.year())?;

        writeln!(f, "\nMarks:")?;
        if marks.is_empty() {
            writeln!(f, "  (No marks recorded)")?;
        }
        for (subject, score) in marks.iter() {
            writeln!(f, "  {subject}: {score:.2}")?;
        }
        writeln!(f, "Average: {:.2}", marks.average())?;

        writeln!(f, "\nFees:")?;
        writeln!(
            f,
            "  Total: {:.2}  Paid: {:.2}  Balance: {:.2}",
            fees.total(),
            fees.paid(),
            fees.balance()
        )?;
        if !fees.history().is_empty() {
            writeln!(f, "\n  Recent Payments:")?;
            for payment in fees.recent(RECENT_PAYMENTS) {
                writeln!(
                    f,
                    "    - {:.2} on {}",
                    payment.amount(),
                    payment.at().format("%Y-%m-%d")
                )?;
            }
        }
        writeln!(f, "-------------------")
    }
}

/// Every payment, oldest first
pub fn fee_history(student: &Student) -> String {
    let history = student.fees().history();
    if history.is_empty() {
        return "No payment history recorded.\n".to_string();
    }

    history
        .iter()
        .map(|p| {
            format!(
                "Amount: {:.2}, Time: {}\n",
                p.amount(),
                crate::storage::format_timestamp(p.at())
            )
        })
        .collect()
}
