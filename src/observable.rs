use crate::prelude::*;
use csv;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// The four columns of a pedigree record.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Name,
    Mother,
    Father,
    Trait,
}

/// Column positions of the four pedigree fields.
#[derive(Clone, Copy)]
struct Fields {
    name: usize,
    mother: usize,
    father: usize,
    observed_trait: usize,
}

impl Fields {
    const POSITIONAL: Fields = Fields {
        name: 0,
        mother: 1,
        father: 2,
        observed_trait: 3,
    };

    fn position(&self, field: Field) -> usize {
        match field {
            Field::Name => self.name,
            Field::Mother => self.mother,
            Field::Father => self.father,
            Field::Trait => self.observed_trait,
        }
    }
}

/// Header names the caller configured for each field.
#[derive(Clone)]
struct FieldNames {
    name: String,
    mother: String,
    father: String,
    observed_trait: String,
}

impl FieldNames {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Mother => &self.mother,
            Field::Father => &self.father,
            Field::Trait => &self.observed_trait,
        }
    }
}

/// Produces People from delimited pedigree records
///
/// `Csv` implements Iterator so it can be passed
/// directly to `Pedigree::observe()`
pub struct Csv {
    records: std::iter::Enumerate<csv::StringRecordsIntoIter<Box<dyn Read>>>,
    fields: Fields,
    names: FieldNames,
    true_marker: String,
    false_marker: String,
    first_row: usize,
}

impl Csv {
    fn missing(&self, row: usize, field: Field) -> Error {
        Error::MissingField {
            row,
            field: self.names.get(field).to_owned(),
        }
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        row: usize,
        field: Field,
    ) -> Result<&'r str> {
        record
            .get(self.fields.position(field))
            .ok_or_else(|| self.missing(row, field))
    }

    fn person(&self, record: &csv::StringRecord, row: usize) -> Result<Person> {
        let name = self.field(record, row, Field::Name)?;
        if name.is_empty() {
            return Err(self.missing(row, Field::Name));
        }
        let mother = optional(self.field(record, row, Field::Mother)?);
        let father = optional(self.field(record, row, Field::Father)?);
        let marker = self.field(record, row, Field::Trait)?;
        let observed_trait = if marker.is_empty() {
            None
        } else if marker == self.true_marker {
            Some(true)
        } else if marker == self.false_marker {
            Some(false)
        } else {
            return Err(Error::InvalidTrait {
                row,
                value: marker.to_string(),
            });
        };
        Ok(Person::from_parts(name.to_string(), mother, father, observed_trait))
    }
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

impl Iterator for Csv {
    type Item = Result<Person>;

    fn next(&mut self) -> Option<Result<Person>> {
        let (idx, record) = self.records.next()?;
        let row = idx + self.first_row;
        let person = record
            .map_err(Error::from)
            .and_then(|record| self.person(&record, row));
        if let Err(e) = &person {
            warn!(row, error = %e, "rejecting pedigree record");
        }
        Some(person)
    }
}

pub struct CsvBuilder {
    headers: bool,
    delimiter: u8,
    name_field: String,
    mother_field: String,
    father_field: String,
    trait_field: String,
    true_marker: String,
    false_marker: String,
}

impl CsvBuilder {
    /// Construct a new Csv builder
    ///
    /// Defaults to comma separated records with a `name,mother,father,trait`
    /// header where a trait of `1` is present, `0` is absent and blank is
    /// unknown.
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            name_field: "name".to_owned(),
            mother_field: "mother".to_owned(),
            father_field: "father".to_owned(),
            trait_field: "trait".to_owned(),
            true_marker: "1".to_owned(),
            false_marker: "0".to_owned(),
        }
    }

    /// Without headers, columns are read as name, mother, father, trait.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn name_field(&mut self, name_field: &str) -> &mut Self {
        self.name_field = name_field.to_owned();
        self
    }

    pub fn mother_field(&mut self, mother_field: &str) -> &mut Self {
        self.mother_field = mother_field.to_owned();
        self
    }

    pub fn father_field(&mut self, father_field: &str) -> &mut Self {
        self.father_field = father_field.to_owned();
        self
    }

    pub fn trait_field(&mut self, trait_field: &str) -> &mut Self {
        self.trait_field = trait_field.to_owned();
        self
    }

    pub fn trait_markers(&mut self, true_marker: &str, false_marker: &str) -> &mut Self {
        self.true_marker = true_marker.to_owned();
        self.false_marker = false_marker.to_owned();
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Csv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names = FieldNames {
            name: self.name_field.clone(),
            mother: self.mother_field.clone(),
            father: self.father_field.clone(),
            observed_trait: self.trait_field.clone(),
        };

        let fields = if self.headers {
            let headers = rdr.headers()?;
            let column = |field: Field| {
                let name = names.get(field);
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| Error::MissingField {
                        row: 1,
                        field: name.to_owned(),
                    })
            };
            Fields {
                name: column(Field::Name)?,
                mother: column(Field::Mother)?,
                father: column(Field::Father)?,
                observed_trait: column(Field::Trait)?,
            }
        } else {
            Fields::POSITIONAL
        };

        Ok(Csv {
            records: rdr.into_records().enumerate(),
            fields,
            names,
            true_marker: self.true_marker.clone(),
            false_marker: self.false_marker.clone(),
            first_row: if self.headers { 2 } else { 1 },
        })
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Csv> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.from_reader(Box::new(file))
    }
}

impl Default for CsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads and validates a pedigree from a CSV file with default settings.
pub fn load_pedigree<P: AsRef<Path>>(path: P) -> Result<Pedigree> {
    let path = path.as_ref();
    let mut pedigree = Pedigree::new();
    pedigree.observe(CsvBuilder::new().from_path(path)?)?;
    pedigree.validate()?;
    info!(path = %path.display(), people = pedigree.len(), "loaded pedigree");
    Ok(pedigree)
}
