/// Get the current date in YYYY-MM-DD format, from the browser clock
pub fn current_date() -> String {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as u32;
    let month = now.get_month() as u32 + 1; // JavaScript months are 0-indexed
    let day = now.get_date() as u32;

    format!("{:04}-{:02}-{:02}", year, month, day)
}
