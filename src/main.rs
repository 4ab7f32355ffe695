//! Scanline preview: spinning cube on a checkerboard floor
//!
//! Usage: `scanline-preview [settings.ron]`
//!
//! Keys:
//! - Arrows: orbit the camera, `+`/`-` zoom
//! - C: cycle face culling (off, back, front, both)
//! - B: cycle blend equation
//! - N: cycle cube shader
//! - T: toggle cube texture (checkerboard or flat)
//! - P: save color buffer to `frame.png`, Shift+P saves `depth.png`

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::f32::consts::PI;
use std::sync::Arc;

use macroquad::prelude::*;
use scanline_rasterizer as raster;
use raster::{
    BlendMode, Capability, CullFace, ImageTexture, NormalShader, PointLightShader, RasterSettings,
    Rasterizer, Shader, SliceShader, SolidColor, StripShader,
};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Scanline v{}", VERSION),
        window_width: raster::WIDTH as i32 * 3,
        window_height: raster::HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_settings() -> RasterSettings {
    match std::env::args().nth(1) {
        Some(path) => match raster::load_settings(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}, using defaults", path, e);
                RasterSettings::default()
            }
        },
        None => RasterSettings::default(),
    }
}

fn shader(s: impl Shader + 'static) -> Option<Arc<dyn Shader>> {
    Some(Arc::new(s))
}

fn cube_shaders() -> Vec<(&'static str, Option<Arc<dyn Shader>>)> {
    vec![
        ("texture", None),
        ("normal", shader(NormalShader)),
        (
            "point light",
            shader(PointLightShader {
                light: raster::Vec3::new(2.0, 3.0, -3.0),
                falloff: 8.0,
            }),
        ),
        (
            "strip",
            shader(StripShader {
                height: 0.25,
                offset: 0.0,
                color_a: raster::Color::RED,
                color_b: raster::Color::WHITE,
            }),
        ),
        ("slice", shader(SliceShader { height: 0.2, offset: 0.0 })),
    ]
}

/// Checkerboard sampler, magenta if the texture cannot be built
fn checker_sampler(size: usize, a: u32, b: u32) -> Arc<dyn raster::Sampler> {
    let (a, b) = (raster::Color::from_argb(a), raster::Color::from_argb(b));
    match ImageTexture::checkerboard(size, size, a, b) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            log::warn!("Checkerboard failed: {}", e);
            Arc::new(SolidColor::default())
        }
    }
}

fn next_cull(r: &mut Rasterizer) -> &'static str {
    let current = r.is_enabled(Capability::CullFace).then(|| r.state().cull_face);
    let (next, label) = match current {
        None => (Some(CullFace::Back), "back"),
        Some(CullFace::Back) => (Some(CullFace::Front), "front"),
        Some(CullFace::Front) => (Some(CullFace::FrontAndBack), "front and back"),
        Some(CullFace::FrontAndBack) => (None, "off"),
    };
    match next {
        Some(face) => {
            r.enable(Capability::CullFace);
            r.cull_face(face);
        }
        None => r.disable(Capability::CullFace),
    }
    label
}

fn cull_label(r: &Rasterizer) -> String {
    if r.is_enabled(Capability::CullFace) {
        format!("{:?}", r.state().cull_face)
    } else {
        "off".to_string()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let settings = load_settings();
    let mut rasterizer = match Rasterizer::from_settings(&settings) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Bad settings: {}, using defaults", e);
            let defaults = RasterSettings::default();
            match Rasterizer::from_settings(&defaults) {
                Ok(r) => r,
                Err(_) => Rasterizer::new(defaults.width, defaults.height),
            }
        }
    };

    let mut camera = raster::Camera::default();
    camera.fov = settings.fov_radians();
    camera.near = settings.near;

    let floor_tex = checker_sampler(64, 0xFF30_3040, 0xFF90_90A0);
    let cube_tex = checker_sampler(16, 0xFFE0_8020, 0xFF20_60C0);

    let mut floor = raster::Mesh::plane(8.0, 4.0, floor_tex);
    floor.position = raster::Vec3::new(0.0, -1.0, 0.0);
    let cube_samplers: [Arc<dyn raster::Sampler>; 2] =
        [cube_tex, Arc::new(SolidColor(raster::Color::from_argb(0xFFD0_D0D0)))];
    let mut sampler_idx = 0;
    let mut cube = raster::Mesh::cube(1.5, cube_samplers[sampler_idx].clone());

    let shaders = cube_shaders();
    let mut shader_idx = 0;
    let mut blend_idx = BlendMode::ALL.iter().position(|&b| b == settings.blend).unwrap_or(0);

    let (mut yaw, mut pitch, mut radius) = (0.6f32, 0.4f32, 5.0f32);
    let mut spin = 0.0f32;

    loop {
        let dt = get_frame_time();

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_down(KeyCode::Left) {
            yaw -= dt * 1.5;
        }
        if is_key_down(KeyCode::Right) {
            yaw += dt * 1.5;
        }
        if is_key_down(KeyCode::Up) {
            pitch += dt;
        }
        if is_key_down(KeyCode::Down) {
            pitch -= dt;
        }
        if is_key_down(KeyCode::Equal) || is_key_down(KeyCode::KpAdd) {
            radius = (radius - dt * 3.0).max(1.5);
        }
        if is_key_down(KeyCode::Minus) || is_key_down(KeyCode::KpSubtract) {
            radius = (radius + dt * 3.0).min(30.0);
        }
        pitch = pitch.clamp(-PI / 2.0 + 0.05, PI / 2.0 - 0.05);

        if is_key_pressed(KeyCode::C) {
            log::info!("Culling: {}", next_cull(&mut rasterizer));
        }
        if is_key_pressed(KeyCode::B) {
            blend_idx = (blend_idx + 1) % BlendMode::ALL.len();
            log::info!("Blend: {:?}", BlendMode::ALL[blend_idx]);
        }
        if is_key_pressed(KeyCode::N) {
            shader_idx = (shader_idx + 1) % shaders.len();
            log::info!("Shader: {}", shaders[shader_idx].0);
        }

        if is_key_pressed(KeyCode::T) {
            sampler_idx = (sampler_idx + 1) % cube_samplers.len();
            cube = cube.with_sampler(cube_samplers[sampler_idx].clone());
        }

        spin += dt;
        cube.rotation = raster::Vec3::new(spin * 0.3, spin, 0.0);
        cube.shader = shaders[shader_idx].1.clone();
        camera.orbit(yaw, pitch, radius);

        rasterizer.clear(true, true);
        // The floor always draws with SET so other equations have something to blend with
        rasterizer.blend_equation(BlendMode::Set);
        let mut stats = rasterizer.render(&floor, &camera);
        rasterizer.blend_equation(BlendMode::ALL[blend_idx]);
        stats += rasterizer.render(&cube, &camera);

        if is_key_pressed(KeyCode::P) {
            let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
            let saved = if shift {
                rasterizer.framebuffer().save_depth_png("depth.png")
            } else {
                rasterizer.framebuffer().save_png("frame.png")
            };
            if let Err(e) = saved {
                log::error!("Save failed: {}", e);
            }
        }

        clear_background(BLACK);

        let fb = rasterizer.framebuffer();
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.to_rgba8());
        texture.set_filter(FilterMode::Nearest);

        // Letterbox to keep the framebuffer aspect
        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let (draw_w, draw_h) = (fb.width as f32 * scale, fb.height as f32 * scale);
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) / 2.0,
            (screen_height() - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "{} fps | cull: {} | blend: {:?} | shader: {} | faces {} culled {} px {}",
                get_fps(),
                cull_label(&rasterizer),
                BlendMode::ALL[blend_idx],
                shaders[shader_idx].0,
                stats.faces,
                stats.culled,
                stats.pixels_written
            ),
            8.0,
            20.0,
            18.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await;
    }
}
