use std::{path::Path, sync::mpsc};

use image::RgbaImage;
use vello::wgpu;

use crate::{
  PlotError, ResultExt,
  render::{GpuHandle, RenderConfig},
};

/// Byte sizes of one RGBA row, before and after padding for a texture copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RowLayout {
  unpadded: usize,
  padded:   u32,
}

impl RowLayout {
  // Rows in a texture copy must be aligned, so the buffer is wider than the
  // image and the padding gets stripped after mapping.
  fn new(config: RenderConfig) -> Result<Self, PlotError> {
    let too_large = || PlotError::PixelBuffer { width: config.width, height: config.height };

    let unpadded = 4 * u64::from(config.width);
    let padded = unpadded.next_multiple_of(u64::from(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT));
    Ok(RowLayout {
      unpadded: usize::try_from(unpadded).map_err(|_| too_large())?,
      padded:   u32::try_from(padded).map_err(|_| too_large())?,
    })
  }

  fn image_len(&self, config: RenderConfig) -> usize {
    self.unpadded.saturating_mul(config.height as usize)
  }
}

/// Copies the render target back to the CPU and encodes it to `path`.
pub(super) fn save(handle: &GpuHandle, config: RenderConfig, path: &Path) -> Result<(), PlotError> {
  let rows = RowLayout::new(config)?;

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(rows.padded) * u64::from(config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(rows.padded),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let slice = buffer.slice(..);
  let (tx, rx) = mpsc::channel();
  slice.map_async(wgpu::MapMode::Read, move |result| {
    tx.send(result).log_err();
  });
  handle.device.poll(wgpu::PollType::Wait)?;
  rx.recv().map_err(|_| PlotError::ReadbackDropped)??;

  let pixels = {
    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity(rows.image_len(config));
    for row in data.chunks_exact(rows.padded as usize) {
      pixels.extend_from_slice(&row[..rows.unpadded]);
    }
    pixels
  };
  buffer.unmap();

  let image = RgbaImage::from_raw(config.width, config.height, pixels)
    .ok_or(PlotError::PixelBuffer { width: config.width, height: config.height })?;
  image.save(path)?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rows_are_padded_to_the_copy_alignment() {
    let rows = RowLayout::new(RenderConfig::default()).unwrap();
    assert_eq!(rows, RowLayout { unpadded: 4000, padded: 4096 });
    assert_eq!(rows.image_len(RenderConfig::default()), 4000 * 600);
  }

  #[test]
  fn wide_images_do_not_overflow() {
    let config = RenderConfig { width: 1 << 30, height: 1 << 20 };
    assert!(matches!(RowLayout::new(config), Err(PlotError::PixelBuffer { .. })));

    let config = RenderConfig { width: 100_000, height: 50_000 };
    let rows = RowLayout::new(config).unwrap();
    assert_eq!(rows.unpadded, 400_000);
    assert_eq!(rows.padded % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
    assert_eq!(rows.image_len(config), 400_000 * 50_000);
  }
}
