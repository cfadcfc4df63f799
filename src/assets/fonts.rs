use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

/// Process-wide font database with the system fonts loaded.
///
/// Loading system fonts is the slowest part of a cold start, so it happens once and every
/// later caller gets a shared read-only handle.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static SYSTEM: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    SYSTEM
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// System fonts plus every font file found directly inside `dirs`.
///
/// Returns the shared system database untouched when `dirs` adds nothing.
pub fn fontdb_with_dirs(dirs: &[&Path]) -> Arc<usvg::fontdb::Database> {
    let base = system_fontdb();
    let mut db: Option<usvg::fontdb::Database> = None;
    for dir in dirs {
        let loaded = load_fonts_from_dir(db.get_or_insert_with(|| (*base).clone()), dir);
        if loaded > 0 {
            tracing::info!(dir = %dir.display(), loaded, "loaded extra fonts");
        }
    }
    match db {
        Some(db) if db.len() > base.len() => Arc::new(db),
        _ => base,
    }
}

/// Load `.ttf`, `.otf` and `.ttc` files from `dir` (not recursive). Returns the number of
/// files loaded.
pub fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) -> usize {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return 0;
    };

    let mut loaded = 0;
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        match db.load_font_file(&path) {
            Ok(()) => loaded += 1,
            Err(err) => tracing::warn!(path = %path.display(), %err, "skipping unreadable font"),
        }
    }
    loaded
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
