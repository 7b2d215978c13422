use std::path::Path;

use kurbo::{Affine, Point, Shape, Stroke, Vec2};
use parley::{Alignment, FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use peniko::{Brush, BrushRef, Fill};
use vello::wgpu::{self, TextureDescriptor};

use crate::{Plot, PlotError, theme};

mod texture;

pub(crate) struct Render {
  scene:  vello::Scene,
  font:   parley::FontContext,
  layout: parley::LayoutContext<Brush>,
}

/// Output size of a rendered figure, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

impl Default for RenderConfig {
  /// 10 by 6 inches at 100 dpi.
  fn default() -> Self { RenderConfig { width: 1000, height: 600 } }
}

pub(crate) struct GpuHandle {
  device:  wgpu::Device,
  queue:   wgpu::Queue,
  texture: wgpu::Texture,
  view:    wgpu::TextureView,
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  /// Applied around `position`, after alignment.
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             12.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(theme::TEXT),
      position:         Point::ORIGIN,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Plot<'_> {
  /// Renders the figure off-screen and writes it to `path`. The image format
  /// follows the file extension. The GPU device and render target are
  /// released before this returns.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
    let path = path.as_ref();
    let config = self.size;

    let mut render = Render::new();
    self.draw(&mut render)?;

    let handle = GpuHandle::new(&config)?;
    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    renderer.render_to_texture(
      &handle.device,
      &handle.queue,
      &render.scene,
      &handle.view,
      &vello::RenderParams {
        base_color:          theme::BACKGROUND,
        width:               config.width,
        height:              config.height,
        antialiasing_method: vello::AaConfig::Area,
      },
    )?;

    texture::save(&handle, config, path)?;
    log::info!("wrote {}x{} figure to {}", config.width, config.height, path.display());

    Ok(())
  }
}

impl Render {
  pub(crate) fn new() -> Self {
    Render {
      scene:  vello::Scene::new(),
      font:   parley::FontContext::new(),
      layout: parley::LayoutContext::new(),
    }
  }

  pub(crate) fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, transform, brush, None, shape);
  }

  pub(crate) fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, transform, brush, None, shape);
  }

  pub(crate) fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub(crate) fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub(crate) fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let width = f64::from(layout.width());
    let height = f64::from(layout.height());
    let offset = Vec2::new(
      match text.horizontal_align {
        Align::Start => 0.0,
        Align::Center => -width / 2.0,
        Align::End => -width,
      },
      match text.vertical_align {
        Align::Start => 0.0,
        Align::Center => -height / 2.0,
        Align::End => -height,
      },
    );
    let transform =
      Affine::translate(text.position.to_vec2()) * text.transform * Affine::translate(offset);

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(false)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  fn new(config: &RenderConfig) -> Result<Self, PlotError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(
      instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
    )
    .or_else(|err| {
      log::warn!("no hardware adapter ({err}), trying a software one");
      pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        force_fallback_adapter: true,
        ..Default::default()
      }))
    })?;
    log::debug!("rendering on {:?}", adapter.get_info().name);

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))?;

    let texture = device.create_texture(&TextureDescriptor {
      label:           Some("Render Texture"),
      size:            config.extent_3d(),
      mip_level_count: 1,
      sample_count:    1,
      dimension:       wgpu::TextureDimension::D2,
      format:          wgpu::TextureFormat::Rgba8Unorm,
      usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
      view_formats:    &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Ok(GpuHandle { device, queue, texture, view })
  }
}

impl Drop for GpuHandle {
  fn drop(&mut self) { self.texture.destroy(); }
}

impl RenderConfig {
  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}
