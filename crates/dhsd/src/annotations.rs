use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{DhsdError, DhsdResult};

/// Expected column set of the annotation table.
pub(crate) const HEADER: [&str; 3] = ["file_name", "text", "writer_id"];

/// A single row of the annotation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AnnotationRecord {
    /// Relative path of the word image.
    pub(crate) file_name: String,

    /// Ground-truth transcription of the word image.
    pub(crate) text: String,

    /// Identifier of the contributing writer.
    pub(crate) writer_id: u32,
}

/// Reads annotation records from `reader`.
///
/// Each `file_name` must be unique and each `text` non-empty; a row
/// violating either constraint, a row with a missing or extra field,
/// and a non-numeric `writer_id` fail with
/// [MalformedInput](DhsdError::MalformedInput).
pub(crate) fn read_annotations_from<R: Read>(
    reader: R,
) -> DhsdResult<Vec<AnnotationRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers: Vec<&str> = rdr.headers()?.iter().collect();
    if headers != HEADER {
        return Err(DhsdError::malformed(format!(
            "expected header '{}', got '{}'",
            HEADER.join(","),
            headers.join(",")
        )));
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        // The header occupies line 1, the first record line 2.
        let line = idx + 2;

        let record: AnnotationRecord = result.map_err(|e| {
            DhsdError::malformed(format!("line {line}: {e}"))
        })?;

        if record.text.is_empty() {
            return Err(DhsdError::malformed(format!(
                "line {line}: transcription must not be empty"
            )));
        }

        if !seen.insert(record.file_name.clone()) {
            return Err(DhsdError::malformed(format!(
                "line {line}: duplicate file_name '{}'",
                record.file_name
            )));
        }

        records.push(record);
    }

    Ok(records)
}

/// Reads the annotation table at `path`.
pub(crate) fn read_annotations<P: AsRef<Path>>(
    path: P,
) -> DhsdResult<Vec<AnnotationRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        DhsdError::Other(format!(
            "unable to read '{}': {e}",
            path.display()
        ))
    })?;

    read_annotations_from(file)
}

/// Writes annotation records to `writer`, header included.
pub(crate) fn write_annotations_to<W: Write>(
    writer: W,
    records: &[AnnotationRecord],
) -> DhsdResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes annotation records to the file at `path`.
pub(crate) fn write_annotations<P: AsRef<Path>>(
    path: P,
    records: &[AnnotationRecord],
) -> DhsdResult<()> {
    write_annotations_to(File::create(path)?, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DhsdError;

    type TestResult = anyhow::Result<()>;

    fn record(
        file_name: &str,
        text: &str,
        writer_id: u32,
    ) -> AnnotationRecord {
        AnnotationRecord {
            file_name: file_name.into(),
            text: text.into(),
            writer_id,
        }
    }

    #[test]
    fn read_annotations_ok() -> TestResult {
        let input = "file_name,text,writer_id\n\
            german_hw_data/0001.png,Bahnhofstraße,1\n\
            german_hw_data/0002.png,Müller-Weg,2\n\
            german_hw_data/0003.png,\"Große, Alte Gasse\",1\n";

        let records = read_annotations_from(input.as_bytes())?;

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            record("german_hw_data/0001.png", "Bahnhofstraße", 1)
        );
        assert_eq!(
            records[1],
            record("german_hw_data/0002.png", "Müller-Weg", 2)
        );
        assert_eq!(records[2].text, "Große, Alte Gasse");

        Ok(())
    }

    #[test]
    fn read_annotations_bad_header() {
        let input = "file_name,transcription,writer_id\n\
            german_hw_data/0001.png,Bahnhofstraße,1\n";

        let err = read_annotations_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DhsdError::MalformedInput(_)));
    }

    #[test]
    fn read_annotations_missing_field() {
        let input = "file_name,text,writer_id\n\
            german_hw_data/0001.png,Bahnhofstraße\n";

        let err = read_annotations_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DhsdError::MalformedInput(_)));
    }

    #[test]
    fn read_annotations_non_numeric_writer() {
        let input = "file_name,text,writer_id\n\
            german_hw_data/0001.png,Bahnhofstraße,first\n";

        let err = read_annotations_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DhsdError::MalformedInput(_)));
    }

    #[test]
    fn read_annotations_empty_text() {
        let input = "file_name,text,writer_id\n\
            german_hw_data/0001.png,,1\n";

        let err = read_annotations_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DhsdError::MalformedInput(_)));
    }

    #[test]
    fn read_annotations_duplicate_file_name() {
        let input = "file_name,text,writer_id\n\
            german_hw_data/0001.png,Bahnhofstraße,1\n\
            german_hw_data/0001.png,Ringstraße,2\n";

        let err = read_annotations_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DhsdError::MalformedInput(_)));
    }

    #[test]
    fn write_annotations_roundtrip() -> TestResult {
        let records = vec![
            record("german_hw_data/0001.png", "Bahnhofstraße", 1),
            record("german_hw_data/0002.png", "Große, Alte Gasse", 2),
        ];

        let mut buf = Vec::new();
        write_annotations_to(&mut buf, &records)?;

        let line = String::from_utf8(buf.clone())?;
        assert!(line.starts_with("file_name,text,writer_id\n"));

        assert_eq!(read_annotations_from(buf.as_slice())?, records);
        Ok(())
    }
}
