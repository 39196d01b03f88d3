use std::sync::{Arc, PoisonError, RwLock};

/// The set of font faces available to the text renderer.
///
/// Cloning a `FontBook` shares the same faces. Rendering works from a
/// `snapshot`, so a render never observes a half-registered family.
#[derive(Clone, Default)]
pub struct FontBook {
    db: Arc<RwLock<Arc<fontdb::Database>>>,
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Book seeded with the fonts installed on this machine
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        map_generic_families(&mut db);
        tracing::debug!(faces = db.len(), "Loaded system fonts");
        Self {
            db: Arc::new(RwLock::new(Arc::new(db))),
        }
    }

    /// Register a font file or collection. Returns how many faces it added.
    pub fn register(&self, data: Vec<u8>) -> usize {
        let mut guard = self.db.write().unwrap_or_else(PoisonError::into_inner);
        let db = Arc::make_mut(&mut *guard);
        let before = db.len();
        db.load_font_data(data);
        map_generic_families(db);
        db.len() - before
    }

    pub fn snapshot(&self) -> Arc<fontdb::Database> {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.snapshot().faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    pub fn face_count(&self) -> usize {
        self.snapshot().len()
    }
}

/// Point the generic families at a registered face when their defaults
/// are not installed, so unknown families still render with something.
fn map_generic_families(db: &mut fontdb::Database) {
    let resolves = |db: &fontdb::Database, family: fontdb::Family<'_>| {
        db.query(&fontdb::Query {
            families: &[family],
            ..Default::default()
        })
        .is_some()
    };
    let serif = resolves(db, fontdb::Family::Serif);
    let sans_serif = resolves(db, fontdb::Family::SansSerif);
    if serif && sans_serif {
        return;
    }

    let Some(name) = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
    else {
        return;
    };
    tracing::debug!(family = %name, serif, sans_serif, "Mapping generic font families");
    if !serif {
        db.set_serif_family(name.clone());
    }
    if !sans_serif {
        db.set_sans_serif_family(name);
    }
}
