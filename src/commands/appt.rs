use anyhow::Result;
use caldesk_core::store::Store;
use chrono::NaiveDate;

use super::{entry_text, to_index};
use crate::render::{appointments_heading, numbered, success, warning};

pub fn add(store: &mut Store, date: NaiveDate, words: &[String]) -> Result<()> {
    let text = entry_text(words)?;
    store.add_appointment(date, text.as_str());

    println!("{}", success(&format!("Added \"{}\" on {}", text, date)));
    Ok(())
}

pub fn remove(store: &mut Store, date: NaiveDate, number: usize) -> Result<()> {
    match to_index(number).and_then(|index| store.remove_appointment(date, index)) {
        Some(text) => println!("{}", success(&format!("Removed \"{}\" from {}", text, date))),
        None => println!(
            "{}",
            warning(&format!("No appointment #{} on {}", number, date))
        ),
    }
    Ok(())
}

pub fn list(store: &Store, date: NaiveDate) -> Result<()> {
    println!("{}", appointments_heading(date));
    for line in numbered(store.appointments_on(date)) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldesk_core::store::StoreOptions;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_add_then_remove_by_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(StoreOptions::new(dir.path().join("data.json")));
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        add(&mut store, date, &words("Dentist at 3")).unwrap();
        add(&mut store, date, &words("Haircut")).unwrap();
        remove(&mut store, date, 1).unwrap();

        assert_eq!(store.appointments_on(date), ["Haircut"]);
    }

    #[test]
    fn test_blank_text_is_rejected_before_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(StoreOptions::new(dir.path().join("data.json")));
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        assert!(add(&mut store, date, &["  ".to_string()]).is_err());
        assert!(!store.has_appointments(date));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_stale_number_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(StoreOptions::new(dir.path().join("data.json")));
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        assert!(remove(&mut store, date, 0).is_ok());
        assert!(remove(&mut store, date, 4).is_ok());
    }
}
