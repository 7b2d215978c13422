use polars::error::PolarsError;
use thiserror::Error;
use vello::wgpu;

/// Everything that can go wrong between a loaded table and a written image.
#[derive(Debug, Error)]
pub enum PlotError {
  #[error("data error: {0}")]
  Polars(#[from] PolarsError),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("no usable GPU adapter: {0}")]
  Adapter(#[from] wgpu::RequestAdapterError),

  #[error("failed to open GPU device: {0}")]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("render failed: {0}")]
  Render(#[from] vello::Error),

  #[error("waiting on the GPU failed: {0}")]
  Poll(#[from] wgpu::PollError),

  #[error("reading back the rendered frame failed: {0}")]
  Readback(#[from] wgpu::BufferAsyncError),

  #[error("readback was dropped before it completed")]
  ReadbackDropped,

  #[error("pixel buffer does not fit a {width}x{height} image")]
  PixelBuffer { width: u32, height: u32 },

  #[error("failed to encode image: {0}")]
  Image(#[from] image::ImageError),
}
