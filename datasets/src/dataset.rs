use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use adclick::Example;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;

use crate::error::{DatasetError, Result};
use crate::hashing::FeatureHasher;

/// Layout of a click log
///
/// The defaults describe the Avazu click logs: an `id` column, a `click` label that is missing in
/// the test split and an `hour` column in `YYMMDDHH` format.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvOptions {
    /// Column holding the external record id, required
    pub id_column: String,
    /// Column holding the `0`/`1` label, records are unlabelled when the column is absent
    pub label_column: String,
    /// Column in `YYMMDDHH` format that is reduced to its hour of day before hashing
    pub hour_column: Option<String>,
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            id_column: "id".to_string(),
            label_column: "click".to_string(),
            hour_column: Some("hour".to_string()),
            delimiter: b',',
        }
    }
}

/// Lazy, one-pass stream of hashed click records
///
/// Every remaining column is treated as a categorical field and hashed together with its name.
pub struct ClickRecords<R: Read> {
    reader: csv::Reader<R>,
    hasher: FeatureHasher,
    id_column: String,
    id_pos: usize,
    label_pos: Option<usize>,
    hour_pos: Option<usize>,
    fields: Vec<(usize, String)>,
    record: StringRecord,
    ordinal: usize,
}

impl<R: Read> ClickRecords<R> {
    /// Read click records from CSV bytes with a header row
    pub fn from_reader(rdr: R, hasher: FeatureHasher, options: &CsvOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(options.delimiter)
            .from_reader(rdr);
        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);

        let id_pos = position(options.id_column.as_str())
            .ok_or_else(|| DatasetError::MissingColumn(options.id_column.clone()))?;
        let label_pos = position(options.label_column.as_str());
        let hour_pos = options.hour_column.as_deref().and_then(position);

        let fields = headers
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != id_pos && Some(*pos) != label_pos)
            .map(|(pos, name)| (pos, name.to_string()))
            .collect();

        Ok(ClickRecords {
            reader,
            hasher,
            id_column: options.id_column.clone(),
            id_pos,
            label_pos,
            hour_pos,
            fields,
            record: StringRecord::new(),
            ordinal: 0,
        })
    }

    /// Whether the records carry labels
    pub fn is_labelled(&self) -> bool {
        self.label_pos.is_some()
    }

    /// Names of the hashed fields in column order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(_, name)| name.as_str()).collect()
    }

    fn parse_label(&self) -> Result<Option<bool>> {
        let pos = match self.label_pos {
            Some(pos) => pos,
            None => return Ok(None),
        };
        match self.record.get(pos).unwrap_or("") {
            "1" | "1.0" => Ok(Some(true)),
            "0" | "0.0" => Ok(Some(false)),
            other => Err(DatasetError::InvalidLabel {
                ordinal: self.ordinal,
                value: other.to_string(),
            }),
        }
    }

    fn build_example(&self) -> Result<Example> {
        let id = self
            .record
            .get(self.id_pos)
            .ok_or_else(|| DatasetError::MissingColumn(self.id_column.clone()))?;
        let label = self.parse_label()?;

        let record = &self.record;
        let hour_pos = self.hour_pos;
        let indices = self.hasher.hash_fields(self.fields.iter().map(|(pos, name)| {
            let value = record.get(*pos).unwrap_or("");
            let value = if Some(*pos) == hour_pos {
                hour_of_day(value)
            } else {
                value
            };
            (name.as_str(), value)
        }));

        Ok(Example::new(self.ordinal, id, indices, label))
    }
}

impl<R: Read> Iterator for ClickRecords<R> {
    type Item = Result<Example>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = std::mem::take(&mut self.record);
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                self.record = record;
                let example = self.build_example();
                self.ordinal += 1;
                Some(example)
            }
            Ok(false) => None,
            Err(err) => {
                self.ordinal += 1;
                Some(Err(err.into()))
            }
        }
    }
}

/// `YYMMDDHH` to `HH`, shorter values become empty
fn hour_of_day(value: &str) -> &str {
    value.get(6..).unwrap_or("")
}

/// Open a click log, files ending in `.gz` are decompressed on the fly
pub fn open<P: AsRef<Path>>(
    path: P,
    hasher: FeatureHasher,
    options: &CsvOptions,
) -> Result<ClickRecords<Box<dyn Read + Send>>> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);
    let gzipped = path.extension().map_or(false, |ext| ext == "gz");
    log::debug!("opening {} (gzip: {})", path.display(), gzipped);

    let rdr: Box<dyn Read + Send> = if gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let records = ClickRecords::from_reader(rdr, hasher, options)?;
    log::debug!(
        "{}: labelled: {}, hashed fields: {:?}",
        path.display(),
        records.is_labelled(),
        records.field_names()
    );
    Ok(records)
}

/// Read click records from gzipped CSV bytes
pub fn records_from_gz_csv<R: Read>(
    gz: R,
    hasher: FeatureHasher,
    options: &CsvOptions,
) -> Result<ClickRecords<GzDecoder<R>>> {
    // unzip file
    ClickRecords::from_reader(GzDecoder::new(gz), hasher, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const TRAIN: &str = "\
id,click,hour,C1,banner_pos,site_id
1000009418151094273,0,14102100,1005,0,1fbe01fe
10000169349117863715,1,14102113,1005,1,1fbe01fe
10000371904215119486,0,14102100,1002,0,85f751fd
";

    const TEST: &str = "\
id,hour,C1,banner_pos,site_id
10000174058809263569,14103100,1005,0,235ba823
";

    fn hasher() -> FeatureHasher {
        FeatureHasher::with_bits(20).unwrap()
    }

    #[test]
    fn reads_labelled_records() {
        let records = ClickRecords::from_reader(TRAIN.as_bytes(), hasher(), &CsvOptions::default())
            .unwrap();
        assert!(records.is_labelled());
        assert_eq!(records.field_names(), vec!["hour", "C1", "banner_pos", "site_id"]);

        let examples: Vec<_> = records.collect::<Result<_>>().unwrap();
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[1].ordinal, 1);
        assert_eq!(examples[1].id, "10000169349117863715");
        assert_eq!(examples[0].label, Some(false));
        assert_eq!(examples[1].label, Some(true));

        let h = hasher();
        assert_eq!(
            examples[1].indices,
            vec![
                0,
                h.index("C1", "1005"),
                h.index("banner_pos", "1"),
                h.index("hour", "13"),
                h.index("site_id", "1fbe01fe"),
            ]
        );
    }

    #[test]
    fn hour_is_reduced_to_hour_of_day() {
        assert_eq!(hour_of_day("14102113"), "13");
        assert_eq!(hour_of_day("1410"), "");

        let examples: Vec<_> =
            ClickRecords::from_reader(TRAIN.as_bytes(), hasher(), &CsvOptions::default())
                .unwrap()
                .collect::<Result<_>>()
                .unwrap();
        // different days, same hour
        let test: Vec<_> =
            ClickRecords::from_reader(TEST.as_bytes(), hasher(), &CsvOptions::default())
                .unwrap()
                .collect::<Result<_>>()
                .unwrap();
        assert!(examples[0].indices.contains(&hasher().index("hour", "00")));
        assert!(test[0].indices.contains(&hasher().index("hour", "00")));
    }

    #[test]
    fn reads_unlabelled_records() {
        let mut records =
            ClickRecords::from_reader(TEST.as_bytes(), hasher(), &CsvOptions::default()).unwrap();
        assert!(!records.is_labelled());
        let example = records.next().unwrap().unwrap();
        assert_eq!(example.label, None);
        assert_eq!(example.indices.len(), 5);
        assert!(records.next().is_none());
    }

    #[test]
    fn missing_id_column() {
        let data = "click,C1\n1,1005\n";
        let result = ClickRecords::from_reader(data.as_bytes(), hasher(), &CsvOptions::default());
        assert!(matches!(result, Err(DatasetError::MissingColumn(ref c)) if c == "id"));
    }

    #[test]
    fn invalid_label() {
        let data = "id,click,C1\na,1,1005\nb,yes,1005\nc,0,1005\n";
        let mut records =
            ClickRecords::from_reader(data.as_bytes(), hasher(), &CsvOptions::default()).unwrap();
        assert!(records.next().unwrap().is_ok());
        match records.next().unwrap() {
            Err(DatasetError::InvalidLabel { ordinal, value }) => {
                assert_eq!(ordinal, 1);
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected {:?}", other),
        }
        // the stream continues after a bad record
        let last = records.next().unwrap().unwrap();
        assert_eq!(last.ordinal, 2);
        assert_eq!(last.label, Some(false));
    }

    #[test]
    fn ragged_rows_are_errors() {
        let data = "id,click,C1\na,1,1005\nb,0\n";
        let mut records =
            ClickRecords::from_reader(data.as_bytes(), hasher(), &CsvOptions::default()).unwrap();
        assert!(records.next().unwrap().is_ok());
        assert!(matches!(records.next(), Some(Err(DatasetError::Csv(_)))));
    }

    #[test]
    fn custom_layout() {
        let data = "uid;y;f\nu1;1;a\n";
        let options = CsvOptions {
            id_column: "uid".to_string(),
            label_column: "y".to_string(),
            hour_column: None,
            delimiter: b';',
        };
        let example = ClickRecords::from_reader(data.as_bytes(), hasher(), &options)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(example.id, "u1");
        assert_eq!(example.label, Some(true));
        assert_eq!(example.indices, vec![0, hasher().index("f", "a")]);
    }

    #[test]
    fn gzipped_bytes() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TRAIN.as_bytes()).unwrap();
        let gz = encoder.finish().unwrap();

        let plain: Vec<_> =
            ClickRecords::from_reader(TRAIN.as_bytes(), hasher(), &CsvOptions::default())
                .unwrap()
                .collect::<Result<_>>()
                .unwrap();
        let unzipped: Vec<_> = records_from_gz_csv(&gz[..], hasher(), &CsvOptions::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(plain, unzipped);
    }

    #[test]
    fn open_detects_gzip_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let plain_path = dir.path().join("train.csv");
        std::fs::write(&plain_path, TRAIN).unwrap();

        let gz_path = dir.path().join("train.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::fast());
        encoder.write_all(TRAIN.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let plain: Vec<_> = open(&plain_path, hasher(), &CsvOptions::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let unzipped: Vec<_> = open(&gz_path, hasher(), &CsvOptions::default())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(plain.len(), 3);
        assert_eq!(plain, unzipped);

        assert!(matches!(
            open(dir.path().join("missing.csv"), hasher(), &CsvOptions::default()),
            Err(DatasetError::Io(_))
        ));
    }
}
