use std::path::{Path, PathBuf};

use crate::contact_book::vcard::{VCard, parse_vcards};
use crate::contact_book::{ContactBook, ExternalContact};
use crate::error::{KeepInTouchError, KeepInTouchResult};

/// Address book backed by a directory of `.vcf` files (a vdir, as kept by
/// vdirsyncer or khard).
///
/// Cards are identified by their UID. A card without one falls back to the
/// file stem, suffixed with `#n` when a file holds several such cards.
#[derive(Debug, Clone)]
pub struct VdirContactBook {
    dir: PathBuf,
}

impl VdirContactBook {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        VdirContactBook { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn vcf_files(&self) -> KeepInTouchResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            KeepInTouchError::Config(format!(
                "Could not read address book at {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("vcf"))
            })
            .collect();

        files.sort();
        Ok(files)
    }

    fn load_file(path: &Path) -> KeepInTouchResult<Vec<ExternalContact>> {
        let content = std::fs::read_to_string(path)?;
        let cards = parse_vcards(&content)
            .map_err(|e| KeepInTouchError::VCard(format!("{}: {e}", path.display())))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let anonymous = cards.iter().filter(|c| c.uid.is_none()).count();

        let mut nth = 0;
        Ok(cards
            .into_iter()
            .map(|card| {
                let fallback = if anonymous > 1 {
                    nth += 1;
                    format!("{stem}#{nth}")
                } else {
                    stem.clone()
                };
                into_contact(card, fallback)
            })
            .collect())
    }
}

fn into_contact(card: VCard, fallback_identifier: String) -> ExternalContact {
    let VCard {
        uid,
        formatted_name,
        mut given_name,
        family_name,
        phone_numbers,
        email_addresses,
    } = card;

    if given_name.is_empty() && family_name.is_empty() {
        given_name = formatted_name.unwrap_or_default();
    }

    ExternalContact {
        identifier: uid.unwrap_or(fallback_identifier),
        given_name,
        family_name,
        phone_numbers,
        email_addresses,
    }
}

impl ContactBook for VdirContactBook {
    fn resolve(&self, identifier: &str) -> KeepInTouchResult<ExternalContact> {
        self.contacts()?
            .into_iter()
            .find(|c| c.identifier == identifier)
            .ok_or_else(|| KeepInTouchError::ContactNotFound(identifier.to_string()))
    }

    fn contacts(&self) -> KeepInTouchResult<Vec<ExternalContact>> {
        let mut contacts = Vec::new();

        for path in self.vcf_files()? {
            match Self::load_file(&path) {
                Ok(found) => contacts.extend(found),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable vCard file"),
            }
        }

        contacts.sort_by_key(|c| c.display_name().to_lowercase());
        Ok(contacts)
    }
}
