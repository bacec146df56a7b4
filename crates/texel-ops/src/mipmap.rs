//! Mip chain generation.
//!
//! Every level is resampled from a copy of the base image, never from the
//! previous level, so filtering error does not compound down the chain.

use texel_core::{mip_chain_size, mip_level_count, Image};
use tracing::{debug, trace, warn};

use crate::{guard, resize, OpsResult, Status};

/// Appends all mip levels down to 1x1 after the base level.
///
/// Level `i` measures `max(1, w >> i)` x `max(1, h >> i)`. Existing levels
/// are discarded first; the image is skipped with a warning when it already
/// holds the full chain.
///
/// # Errors
///
/// [`OpsError::UnsupportedFormat`](crate::OpsError::UnsupportedFormat) for
/// block-compressed images.
pub fn generate_mipmaps(image: &mut Image) -> OpsResult<Status> {
    if guard::editable(image, "generate_mipmaps")?.is_none() {
        return Ok(Status::Skipped);
    }
    let (width, height) = image.dimensions();
    let levels = mip_level_count(width, height);
    if image.mipmaps() >= levels {
        warn!(mipmaps = image.mipmaps(), "Mipmaps already available");
        return Ok(Status::Skipped);
    }
    let total = mip_chain_size(width, height, image.format(), levels);
    debug!(width, height, levels, bytes = total, "Generating mipmaps");

    let mut data = Vec::with_capacity(total);
    data.extend_from_slice(image.base_level());
    for level in 1..levels {
        let (w, h) = image.mip_level_dims(level);
        trace!(level, width = w, height = h, "Generating mip level");
        let mip = resize::resampled(image, w, h)?;
        data.extend_from_slice(mip.data());
    }

    *image = Image::from_data_with_mipmaps(data, width, height, image.format(), levels)?;
    Ok(Status::Applied)
}
