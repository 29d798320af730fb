//! Faculty display formatting

use crate::models::FacultyRecord;

/// Format a list of faculty as an aligned table
pub fn format_faculty_list(faculty: &[FacultyRecord]) -> String {
    if faculty.is_empty() {
        return "No faculty registered.".to_string();
    }

    let name_width = faculty
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let email_width = faculty
        .iter()
        .map(|f| f.email.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = format!(
        "{:<18}  {:<name_width$}  {:<email_width$}  {:<10}  {}\n",
        "ID",
        "Name",
        "Email",
        "PAN",
        "Registered",
        name_width = name_width,
        email_width = email_width,
    );
    output.push_str(&"-".repeat(18 + name_width + email_width + 10 + 18));
    output.push('\n');

    for f in faculty {
        output.push_str(&format!(
            "{:<18}  {:<name_width$}  {:<email_width$}  {:<10}  {}\n",
            f.id,
            f.name,
            f.email,
            f.pan_number,
            f.created_at.format("%Y-%m-%d"),
            name_width = name_width,
            email_width = email_width,
        ));
    }

    output.push_str(&format!("\n{} faculty", faculty.len()));
    output
}

/// Format one faculty record with all of its details
pub fn format_faculty_details(f: &FacultyRecord) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", f.name));
    output.push_str(&format!("  ID:            {}\n", f.id));
    output.push_str(&format!("  Email:         {}\n", f.email));
    output.push_str(&format!("  Phone:         {}\n", f.phone));
    output.push_str(&format!("  Bank:          {}\n", f.bank_name));
    output.push_str(&format!("  Account No.:   {}\n", f.bank_account_number));
    output.push_str(&format!("  IFSC:          {}\n", f.ifsc_code));
    output.push_str(&format!("  PAN:           {}\n", f.pan_number));
    output.push_str(&format!("  Aadhar:        {}\n", f.aadhar_number));
    output.push_str(&format!(
        "  Password:      {}\n",
        if f.has_secret() { "set" } else { "not set" }
    ));
    output.push_str(&format!(
        "  Registered:    {}",
        f.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output
}
