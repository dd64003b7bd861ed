use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlVertexArrayObject,
    WebGlTexture, WebGlFramebuffer, WebGlRenderbuffer, WebGlUniformLocation,
};
use crate::camera::OrbitCamera;
use crate::error::SceneError;
use crate::generation::palette::hex_to_rgb;
use crate::math::{Mat4, Vec3};
use crate::mesh::{primitives, Mesh, VERTEX_STRIDE};
use crate::particles::{instance_data, InstanceTransform, FOLIAGE_STRIDE, INSTANCE_STRIDE};
use super::webgl::WebGLContext;
use super::shaders::*;

type Gl = WebGl2RenderingContext;

const BACKGROUND_HEX: u32 = 0x020202;
/// The whole scene sits slightly below the orbit target
const GROUP_OFFSET: Vec3 = Vec3 { x: 0.0, y: -2.0, z: 0.0 };

const BLOOM_THRESHOLD: f32 = 0.8;
const BLOOM_STRENGTH: f32 = 1.2;
const VIGNETTE_OFFSET: f32 = 0.1;
const VIGNETTE_DARKNESS: f32 = 1.1;

/// Surface response of one instanced population
#[derive(Debug, Clone, Copy)]
struct Material {
    roughness: f32,
    emissive: f32,
}

const BAUBLE_MATERIAL: Material = Material { roughness: 0.15, emissive: 0.0 };
const GIFT_MATERIAL: Material = Material { roughness: 0.2, emissive: 0.0 };
const STAR_MATERIAL: Material = Material { roughness: 0.1, emissive: 2.0 };

/// Cached uniform locations for foliage shader
struct FoliageUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for instanced shader
struct InstancedUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for post-processing
struct PostUniforms {
    extract_texture: Option<WebGlUniformLocation>,
    threshold: Option<WebGlUniformLocation>,
    blur_texture: Option<WebGlUniformLocation>,
    direction: Option<WebGlUniformLocation>,
    scene: Option<WebGlUniformLocation>,
    bloom: Option<WebGlUniformLocation>,
    bloom_strength: Option<WebGlUniformLocation>,
    vignette_offset: Option<WebGlUniformLocation>,
    vignette_darkness: Option<WebGlUniformLocation>,
}

/// A static mesh drawn once per entry of a dynamic instance buffer
struct InstancedMesh {
    vao: WebGlVertexArrayObject,
    instance_buffer: WebGlBuffer,
    index_count: i32,
    instance_count: i32,
    material: Material,
}

impl InstancedMesh {
    fn new(ctx: &WebGLContext, mesh: &Mesh, material: Material) -> Result<Self, SceneError> {
        let gl = &ctx.gl;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = ctx.create_buffer_f32(&mesh.vertex_data(), Gl::STATIC_DRAW)?;
        ctx.create_index_buffer(mesh.index_data(), Gl::STATIC_DRAW)?;

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex_buffer));
        ctx.float_attribute(0, 3, VERTEX_STRIDE, 0);
        ctx.float_attribute(1, 3, VERTEX_STRIDE, 3);

        // One mat4 takes four vec4 slots (locations 2..=5), then colour
        let instance_buffer = ctx.create_buffer_f32(&[], Gl::DYNAMIC_DRAW)?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&instance_buffer));
        for column in 0..4 {
            ctx.instanced_attribute(2 + column as u32, 4, INSTANCE_STRIDE, column * 4);
        }
        ctx.instanced_attribute(6, 3, INSTANCE_STRIDE, 16);

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        log::debug!("uploaded mesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());

        Ok(Self {
            vao,
            instance_buffer,
            index_count: (mesh.triangle_count() * 3) as i32,
            instance_count: 0,
            material,
        })
    }

    fn update(&mut self, ctx: &WebGLContext, instances: &[InstanceTransform]) {
        ctx.write_buffer_f32(&self.instance_buffer, &instance_data(instances));
        self.instance_count = instances.len() as i32;
    }
}

/// Offscreen targets for the bloom chain
struct RenderTargets {
    scene_texture: WebGlTexture,
    // Held so the attachment outlives the framebuffer
    _scene_depth: WebGlRenderbuffer,
    scene_fbo: WebGlFramebuffer,
    bloom_textures: [WebGlTexture; 2],
    bloom_fbos: [WebGlFramebuffer; 2],
}

impl RenderTargets {
    fn new(ctx: &WebGLContext, width: i32, height: i32) -> Result<Self, SceneError> {
        let scene_texture = ctx.create_texture(width, height, Gl::RGBA)?;
        let scene_depth = ctx.create_depth_buffer(width, height)?;
        let scene_fbo = ctx.create_framebuffer(&scene_texture, Some(&scene_depth))?;

        // Bloom at half resolution
        let (bw, bh) = (width / 2, height / 2);
        let bloom_a = ctx.create_texture(bw, bh, Gl::RGBA)?;
        let bloom_b = ctx.create_texture(bw, bh, Gl::RGBA)?;
        let fbo_a = ctx.create_framebuffer(&bloom_a, None)?;
        let fbo_b = ctx.create_framebuffer(&bloom_b, None)?;

        log::debug!("render targets created at {}x{}", width, height);

        Ok(Self {
            scene_texture,
            _scene_depth: scene_depth,
            scene_fbo,
            bloom_textures: [bloom_a, bloom_b],
            bloom_fbos: [fbo_a, fbo_b],
        })
    }
}

/// Complete render pipeline for the tree scene
pub struct RenderPipeline {
    ctx: WebGLContext,

    // Shaders
    foliage_program: WebGlProgram,
    instanced_program: WebGlProgram,
    bloom_extract_program: WebGlProgram,
    blur_program: WebGlProgram,
    composite_program: WebGlProgram,

    // Uniform locations
    foliage_uniforms: FoliageUniforms,
    instanced_uniforms: InstancedUniforms,
    post_uniforms: PostUniforms,

    // Foliage point cloud
    foliage_vao: WebGlVertexArrayObject,
    foliage_buffer: WebGlBuffer,
    foliage_count: i32,

    baubles: InstancedMesh,
    gifts: InstancedMesh,
    star: InstancedMesh,

    targets: RenderTargets,

    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(gl: Gl, width: i32, height: i32) -> Result<Self, SceneError> {
        let ctx = WebGLContext::new(gl);

        let foliage_program = ctx.create_program(FOLIAGE_VERTEX_SHADER, FOLIAGE_FRAGMENT_SHADER)?;
        let instanced_program = ctx.create_program(INSTANCED_VERTEX_SHADER, INSTANCED_FRAGMENT_SHADER)?;
        let bloom_extract_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLOOM_EXTRACT_SHADER)?;
        let blur_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLUR_SHADER)?;
        let composite_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, COMPOSITE_SHADER)?;
        log::debug!("shader programs linked");

        let foliage_uniforms = FoliageUniforms {
            model: ctx.get_uniform_location(&foliage_program, "u_model"),
            view: ctx.get_uniform_location(&foliage_program, "u_view"),
            projection: ctx.get_uniform_location(&foliage_program, "u_projection"),
        };

        let instanced_uniforms = InstancedUniforms {
            model: ctx.get_uniform_location(&instanced_program, "u_model"),
            view: ctx.get_uniform_location(&instanced_program, "u_view"),
            projection: ctx.get_uniform_location(&instanced_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&instanced_program, "u_camera_pos"),
            roughness: ctx.get_uniform_location(&instanced_program, "u_roughness"),
            emissive: ctx.get_uniform_location(&instanced_program, "u_emissive"),
        };

        let post_uniforms = PostUniforms {
            extract_texture: ctx.get_uniform_location(&bloom_extract_program, "u_texture"),
            threshold: ctx.get_uniform_location(&bloom_extract_program, "u_threshold"),
            blur_texture: ctx.get_uniform_location(&blur_program, "u_texture"),
            direction: ctx.get_uniform_location(&blur_program, "u_direction"),
            scene: ctx.get_uniform_location(&composite_program, "u_scene"),
            bloom: ctx.get_uniform_location(&composite_program, "u_bloom"),
            bloom_strength: ctx.get_uniform_location(&composite_program, "u_bloom_strength"),
            vignette_offset: ctx.get_uniform_location(&composite_program, "u_vignette_offset"),
            vignette_darkness: ctx.get_uniform_location(&composite_program, "u_vignette_darkness"),
        };

        // Format: position(3) + size(1) + alpha(1) + color(3)
        let foliage_vao = ctx.create_vao()?;
        ctx.gl.bind_vertex_array(Some(&foliage_vao));
        let foliage_buffer = ctx.create_buffer_f32(&[], Gl::DYNAMIC_DRAW)?;
        ctx.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&foliage_buffer));
        ctx.float_attribute(0, 3, FOLIAGE_STRIDE, 0);
        ctx.float_attribute(1, 1, FOLIAGE_STRIDE, 3);
        ctx.float_attribute(2, 1, FOLIAGE_STRIDE, 4);
        ctx.float_attribute(3, 3, FOLIAGE_STRIDE, 5);
        ctx.gl.bind_vertex_array(None);
        ctx.gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        let baubles = InstancedMesh::new(&ctx, &primitives::sphere(1.0, 32, 32), BAUBLE_MATERIAL)?;
        let gifts = InstancedMesh::new(&ctx, &primitives::cube(1.0), GIFT_MATERIAL)?;
        let star = InstancedMesh::new(&ctx, &primitives::star(), STAR_MATERIAL)?;
        log::debug!("instanced meshes uploaded");

        let targets = RenderTargets::new(&ctx, width, height)?;

        Ok(Self {
            ctx,
            foliage_program,
            instanced_program,
            bloom_extract_program,
            blur_program,
            composite_program,
            foliage_uniforms,
            instanced_uniforms,
            post_uniforms,
            foliage_vao,
            foliage_buffer,
            foliage_count: 0,
            baubles,
            gifts,
            star,
            targets,
            width,
            height,
        })
    }

    /// Replace the foliage point buffer, `FOLIAGE_STRIDE` floats per point
    pub fn update_foliage(&mut self, data: &[f32]) {
        self.ctx.write_buffer_f32(&self.foliage_buffer, data);
        self.foliage_count = (data.len() / FOLIAGE_STRIDE) as i32;
    }

    pub fn update_instances(
        &mut self,
        baubles: &[InstanceTransform],
        gifts: &[InstanceTransform],
        star: &InstanceTransform,
    ) {
        self.baubles.update(&self.ctx, baubles);
        self.gifts.update(&self.ctx, gifts);
        self.star.update(&self.ctx, std::slice::from_ref(star));
    }

    /// Render a frame
    pub fn render(&self, camera: &OrbitCamera) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = camera.projection_matrix(aspect);
        let view = camera.view_matrix();
        let model = Mat4::translation(GROUP_OFFSET);

        // === Pass 1: Render scene to framebuffer ===
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.targets.scene_fbo));
        self.ctx.viewport(0, 0, self.width, self.height);
        let bg = hex_to_rgb(BACKGROUND_HEX);
        self.ctx.clear(bg.x, bg.y, bg.z, 1.0);
        self.ctx.enable_depth_test();
        gl.disable(Gl::BLEND);

        // Solid ornaments first so the additive points respect their depth
        gl.use_program(Some(&self.instanced_program));
        self.ctx.uniform_matrix4fv(self.instanced_uniforms.model.as_ref(), model.as_slice());
        self.ctx.uniform_matrix4fv(self.instanced_uniforms.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(self.instanced_uniforms.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_3fv(self.instanced_uniforms.camera_pos.as_ref(), camera.position().to_array());
        for mesh in [&self.baubles, &self.gifts, &self.star] {
            self.draw_instanced(mesh);
        }

        if self.foliage_count > 0 {
            gl.use_program(Some(&self.foliage_program));
            gl.depth_mask(false);
            self.ctx.enable_additive_blending();

            self.ctx.uniform_matrix4fv(self.foliage_uniforms.model.as_ref(), model.as_slice());
            self.ctx.uniform_matrix4fv(self.foliage_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(self.foliage_uniforms.projection.as_ref(), projection.as_slice());

            gl.bind_vertex_array(Some(&self.foliage_vao));
            gl.draw_arrays(Gl::POINTS, 0, self.foliage_count);
            gl.depth_mask(true);
        }
        gl.bind_vertex_array(None);

        // === Pass 2: Extract bloom ===
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.targets.bloom_fbos[0]));
        self.ctx.viewport(0, 0, self.width / 2, self.height / 2);
        gl.disable(Gl::DEPTH_TEST);
        gl.disable(Gl::BLEND);

        gl.use_program(Some(&self.bloom_extract_program));
        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.targets.scene_texture));
        self.ctx.uniform_1i(self.post_uniforms.extract_texture.as_ref(), 0);
        self.ctx.uniform_1f(self.post_uniforms.threshold.as_ref(), BLOOM_THRESHOLD);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        // === Pass 3: Blur horizontally ===
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.targets.bloom_fbos[1]));
        gl.use_program(Some(&self.blur_program));
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.targets.bloom_textures[0]));
        self.ctx.uniform_1i(self.post_uniforms.blur_texture.as_ref(), 0);
        self.ctx.uniform_2f(self.post_uniforms.direction.as_ref(), 1.0, 0.0);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        // === Pass 4: Blur vertically ===
        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.targets.bloom_fbos[0]));
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.targets.bloom_textures[1]));
        self.ctx.uniform_2f(self.post_uniforms.direction.as_ref(), 0.0, 1.0);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        // === Pass 5: Composite ===
        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);
        self.ctx.viewport(0, 0, self.width, self.height);
        gl.use_program(Some(&self.composite_program));

        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.targets.scene_texture));
        self.ctx.uniform_1i(self.post_uniforms.scene.as_ref(), 0);

        gl.active_texture(Gl::TEXTURE1);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.targets.bloom_textures[0]));
        self.ctx.uniform_1i(self.post_uniforms.bloom.as_ref(), 1);

        self.ctx.uniform_1f(self.post_uniforms.bloom_strength.as_ref(), BLOOM_STRENGTH);
        self.ctx.uniform_1f(self.post_uniforms.vignette_offset.as_ref(), VIGNETTE_OFFSET);
        self.ctx.uniform_1f(self.post_uniforms.vignette_darkness.as_ref(), VIGNETTE_DARKNESS);
        gl.draw_arrays(Gl::TRIANGLES, 0, 3);

        gl.active_texture(Gl::TEXTURE0);
    }

    fn draw_instanced(&self, mesh: &InstancedMesh) {
        if mesh.instance_count == 0 {
            return;
        }
        let gl = &self.ctx.gl;
        self.ctx.uniform_1f(self.instanced_uniforms.roughness.as_ref(), mesh.material.roughness);
        self.ctx.uniform_1f(self.instanced_uniforms.emissive.as_ref(), mesh.material.emissive);
        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_elements_instanced_with_i32(
            Gl::TRIANGLES,
            mesh.index_count,
            Gl::UNSIGNED_INT,
            0,
            mesh.instance_count,
        );
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SceneError> {
        self.targets = RenderTargets::new(&self.ctx, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}
