use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::Zone;
use super::providers::{ZoneDirectory, ZoneDirectoryError};

/// Zone directory held in memory, either handed over directly or hydrated
/// from a CSV export with columns `name,zip_codes,cities` where the
/// membership sets are semicolon-separated.
pub struct StaticZoneDirectory {
    zones: Vec<Zone>,
}

impl StaticZoneDirectory {
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ZoneDirectoryError> {
        let file = std::fs::File::open(path)
            .map_err(|err| ZoneDirectoryError::Unavailable(err.to_string()))?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ZoneDirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut zones = Vec::new();
        for record in csv_reader.deserialize::<ZoneRow>() {
            let row = record.map_err(|err| ZoneDirectoryError::Malformed(err.to_string()))?;
            zones.push(row.into_zone());
        }

        Ok(Self { zones })
    }
}

impl ZoneDirectory for StaticZoneDirectory {
    fn list_zones(&self) -> Result<Vec<Zone>, ZoneDirectoryError> {
        Ok(self.zones.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ZoneRow {
    name: String,
    #[serde(default)]
    zip_codes: String,
    #[serde(default)]
    cities: String,
}

impl ZoneRow {
    fn into_zone(self) -> Zone {
        Zone {
            name: self.name,
            zip_codes: split_members(&self.zip_codes),
            cities: split_members(&self.cities),
        }
    }
}

fn split_members(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
