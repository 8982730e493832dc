//! Create, update and delete over an ordered list of records.
//!
//! Every operation returns a new list and leaves the input untouched.
//! Deletion is irreversible, confirming intent is up to the caller.

use crate::{Draft, Error, Record, Result};

/// One greater than the largest identifier, or 1 for an empty list.
pub fn next_id(records: &[Record]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

fn position(records: &[Record], id: u64) -> Result<usize> {
    records
        .iter()
        .position(|r| r.id == id)
        .ok_or(Error::NotFound { id })
}

pub fn create(records: &[Record], draft: &Draft) -> Result<(Vec<Record>, u64)> {
    draft.validate()?;
    let id = next_id(records);
    let mut result = records.to_vec();
    result.push(Record::new(id, draft.fields.clone()));
    Ok((result, id))
}

/// Replace the record with `id`, keeping its identifier and position.
pub fn update(records: &[Record], id: u64, draft: &Draft) -> Result<Vec<Record>> {
    let index = position(records, id)?;
    draft.validate()?;
    let mut result = records.to_vec();
    result[index] = Record::new(id, draft.fields.clone());
    Ok(result)
}

pub fn delete(records: &[Record], id: u64) -> Result<Vec<Record>> {
    let index = position(records, id)?;
    let mut result = records.to_vec();
    result.remove(index);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::mutate::{create, delete, next_id, update};
    use crate::{seed, Draft, EntityKind, Error, Record, Result, ValidationError};

    fn office() -> Draft {
        Draft::new(EntityKind::Office)
            .with("region", "Gondar")
            .with("address", "Piassa, House No. 44")
            .with("phone", "+251-58-111-4444")
            .with("email", "gondar@kirkoslegalaid.org")
            .with("hours", "8:00 AM - 5:00 PM")
    }

    fn two_offices() -> Result<Vec<Record>> {
        Ok(seed::offices()?.into_iter().take(2).collect())
    }

    #[test]
    fn create_assigns_next_id() -> Result<()> {
        let records = two_offices()?;
        let (created, id) = create(&records, &office())?;
        assert_eq!(3, id);
        assert_eq!(3, created.len());
        assert_eq!(office().fields, created[2].fields);

        let restored = delete(&created, id)?;
        assert_eq!(records, restored);
        Ok(())
    }

    #[test]
    fn create_in_empty_collection() -> Result<()> {
        let (created, id) = create(&[], &office())?;
        assert_eq!(1, id);
        assert_eq!(1, created[0].id);
        Ok(())
    }

    #[test]
    fn next_id_uses_maximum() -> Result<()> {
        let mut records = two_offices()?;
        records[0].id = 9;
        assert_eq!(10, next_id(&records));
        Ok(())
    }

    #[test]
    fn create_requires_fields() -> Result<()> {
        let records = two_offices()?;
        let mut draft = office();
        draft.fields.shift_remove("email");
        let result = create(&records, &draft);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField { .. }))
        ));
        Ok(())
    }

    #[test]
    fn update_then_read_back() -> Result<()> {
        let records = two_offices()?;
        let draft = office();
        let updated = update(&records, 1, &draft)?;
        assert_eq!(records.len(), updated.len());
        let record = updated.iter().find(|r| r.id == 1).unwrap();
        assert_eq!(&Record::new(1, draft.fields.clone()), record);
        assert_eq!(records[1], updated[1]);
        Ok(())
    }

    #[test]
    fn update_missing_id() -> Result<()> {
        let records = two_offices()?;
        let before = records.clone();
        let result = update(&records, 99, &office());
        assert!(matches!(result, Err(Error::NotFound { id: 99 })));
        assert_eq!(before, records);
        Ok(())
    }

    #[test]
    fn update_validates() -> Result<()> {
        let records = two_offices()?;
        let draft = office().with("email", "");
        assert!(matches!(update(&records, 2, &draft), Err(Error::Validation(_))));
        Ok(())
    }

    #[test]
    fn delete_missing_id() -> Result<()> {
        let records = two_offices()?;
        assert!(matches!(delete(&records, 3), Err(Error::NotFound { id: 3 })));
        let remaining = delete(&records, 1)?;
        assert_eq!(vec![2], remaining.iter().map(|r| r.id).collect::<Vec<_>>());
        Ok(())
    }
}
