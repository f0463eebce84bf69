//! Filename derivation following the asset naming contract: the narrow variant
//! of `X.ext` is `XV.ext` (with the configured marker in place of `V`).

use crate::config::ImageConfig;
use crate::screen::ScreenClass;
use crate::season::SeasonSlot;
use crate::BackgroundError;

/// Insert `marker` right before the last `.`; a name without a dot is
/// returned untouched.
pub fn insert_marker(filename: &str, marker: char) -> String {
    match filename.rfind('.') {
        Some(dot) => {
            let (stem, extension) = filename.split_at(dot);
            let mut out = String::with_capacity(filename.len() + marker.len_utf8());
            out.push_str(stem);
            out.push(marker);
            out.push_str(extension);
            out
        }
        None => filename.to_string(),
    }
}

/// Filename to show for `slot` on a `class` screen.
pub fn derive_filename(
    config: &ImageConfig,
    slot: SeasonSlot,
    class: ScreenClass,
) -> Result<String, BackgroundError> {
    let base = config
        .image_for(slot)
        .ok_or(BackgroundError::MissingSlot(slot))?;

    Ok(match class {
        ScreenClass::Wide => base.to_string(),
        ScreenClass::Narrow => insert_marker(base, config.marker),
    })
}

/// URL of `filename` under the configured base path.
pub fn asset_path(config: &ImageConfig, filename: &str) -> String {
    format!("{}{}", config.base_path, filename)
}

/// Full URL path: base path followed by the derived filename.
pub fn image_path(
    config: &ImageConfig,
    slot: SeasonSlot,
    class: ScreenClass,
) -> Result<String, BackgroundError> {
    let filename = derive_filename(config, slot, class)?;
    Ok(asset_path(config, &filename))
}
