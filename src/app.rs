use crate::core::pipeline::Shader;
use crate::io::config::Config;
use crate::io::image::{frame_output_path, save_buffer_to_image};
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::ShaderKind;
use crate::pipeline::shaders::phong::PhongShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use anyhow::Result;
use log::info;
use std::path::Path;
use std::time::Instant;

/// Picks the fragment shader named in the configuration.
pub fn build_shader(kind: ShaderKind, context: &RenderContext) -> Box<dyn Shader> {
    match kind {
        ShaderKind::Phong => Box::new(PhongShader::new(context.light, context.material.clone())),
        ShaderKind::Unlit => Box::new(UnlitShader),
    }
}

/// Renders `config.render.frames` frames and writes each one to disk.
///
/// The animation advances by `frame_time` between frames; the first frame
/// shows the starting pose.
pub fn run(config: &Config) -> Result<()> {
    let width = config.render.width;
    let height = config.render.height;
    let frames = config.render.frames.max(1);

    info!("Rendering {frames} frame(s) at {width}x{height}...");

    let mut context = init_scene_resources(config);
    let mut renderer = Renderer::with_state(width, height, config.render.render_state());
    let shader_kind = config.render.shader_kind();
    let shader = build_shader(shader_kind, &context);

    info!(
        "Shader: {}, shading: {}, cull mode: {}, normal map: {}, visualization: {:?}",
        shader_kind,
        renderer.state.shading_mode(),
        renderer.state.cull_mode(),
        renderer.state.shading.normal_map,
        renderer.state.visualization()
    );

    let base = Path::new(&config.render.output);
    let start = Instant::now();

    for frame in 0..frames {
        if frame > 0 {
            context.update(config.render.frame_time);
        }

        let stats = renderer.render_frame(&mut context.meshes, &context.camera, shader.as_ref());

        let path = frame_output_path(base, frame, frames);
        save_buffer_to_image(&renderer.framebuffer, &path)?;
        info!(
            "Frame {}/{} saved to {} ({} pixels shaded)",
            frame + 1,
            frames,
            path.display(),
            stats.pixels_shaded
        );
    }

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
