//! Cache warming for every image the controller might pick.

use crate::config::ImageConfig;
use crate::env::ImageLoader;
use crate::filename::image_path;
use crate::screen::ScreenClass;
use log::{debug, warn};

/// Wide then narrow path for each configured slot, in slot order.
pub fn preload_urls(config: &ImageConfig) -> Vec<String> {
    let mut urls = Vec::with_capacity(config.images.len() * 2);
    for &slot in config.images.keys() {
        for class in [ScreenClass::Wide, ScreenClass::Narrow] {
            match image_path(config, slot, class) {
                Ok(url) => urls.push(url),
                Err(e) => warn!("Not preloading slot {}: {}", slot, e),
            }
        }
    }
    urls
}

/// Kick off a fetch for every candidate image. Nothing waits on the result.
pub fn preload(config: &ImageConfig, loader: &dyn ImageLoader) {
    let urls = preload_urls(config);
    debug!("Preloading {} background images", urls.len());
    for url in &urls {
        loader.load(url);
    }
}
