//! Opening external resources (the drive browser) outside the app.

use std::rc::Rc;

use crate::error::{MediaError, MediaResult};

/// Something that can hand a URL to the outside world.
pub trait ResourceOpener {
    fn open(&self, url: &str) -> MediaResult<()>;
}

/// Opener shared with components through context.
pub type SharedOpener = Rc<dyn ResourceOpener>;

/// Opens URLs with the platform's default handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemOpener;

impl ResourceOpener for SystemOpener {
    fn open(&self, url: &str) -> MediaResult<()> {
        open::that_detached(url).map_err(|err| MediaError::Open {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Open `url`, logging instead of failing. Returns whether it opened.
pub fn open_external(opener: &dyn ResourceOpener, url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        log::warn!("Refusing to open an empty URL");
        return false;
    }
    match opener.open(url) {
        Ok(()) => {
            log::info!("Opened {}", url);
            true
        }
        Err(err) => {
            log::error!("{}", err);
            false
        }
    }
}
