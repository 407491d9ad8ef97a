//! In-memory render device for tests

use glam::Mat4;

use super::device::*;
use super::vertex::Vertex;
use crate::error::RenderError;
use crate::transform::Viewport;

/// Records everything asked of it instead of touching a GPU
#[derive(Debug)]
pub struct HeadlessDevice {
    pub viewport: Viewport,
    pub buffers: ResourcePool<Vec<Vertex>>,
    pub uniforms: ResourcePool<Mat4>,
    pub textures: ResourcePool<(u32, u32)>,
    pub pipelines: ResourcePool<PipelineDesc>,
    /// Draws queued in the current frame
    pub pending: Vec<DrawCall>,
    /// Draws submitted by the last `present`
    pub presented: Vec<DrawCall>,
    pub frames_begun: u32,
    pub frames_presented: u32,
    pub resizes: Vec<(u32, u32)>,
    pub failed_releases: u32,
    /// Pipeline creation with this label fails
    pub fail_pipeline: Option<String>,
    /// The next `present` reports out-of-memory
    pub fail_present: bool,
    /// Uniform buffer creation reports out-of-memory
    pub fail_uniform: bool,
}

impl HeadlessDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::from_pixels(width, height),
            buffers: ResourcePool::new(BufferHandle::KIND),
            uniforms: ResourcePool::new(UniformHandle::KIND),
            textures: ResourcePool::new(TextureHandle::KIND),
            pipelines: ResourcePool::new(PipelineHandle::KIND),
            pending: Vec::new(),
            presented: Vec::new(),
            frames_begun: 0,
            frames_presented: 0,
            resizes: Vec::new(),
            failed_releases: 0,
            fail_pipeline: None,
            fail_present: false,
            fail_uniform: false,
        }
    }

    /// Resources not yet released
    pub fn live_resources(&self) -> usize {
        self.buffers.live() + self.uniforms.live() + self.textures.live() + self.pipelines.live()
    }

    pub fn transform(&self, uniform: UniformHandle) -> Mat4 {
        *self.uniforms.get(uniform.index()).unwrap()
    }

    pub fn vertices(&self, buffer: BufferHandle) -> &[Vertex] {
        self.buffers.get(buffer.index()).unwrap()
    }

    pub fn pipeline(&self, pipeline: PipelineHandle) -> &PipelineDesc {
        self.pipelines.get(pipeline.index()).unwrap()
    }
}

impl RenderDevice for HeadlessDevice {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn create_vertex_buffer(
        &mut self,
        _label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError> {
        Ok(BufferHandle(self.buffers.insert(vertices.to_vec())))
    }

    fn write_vertex_buffer(
        &mut self,
        buffer: BufferHandle,
        vertices: &[Vertex],
    ) -> Result<(), RenderError> {
        *self.buffers.get_mut(buffer.index())? = vertices.to_vec();
        Ok(())
    }

    fn create_uniform_buffer(&mut self, _label: &str) -> Result<UniformHandle, RenderError> {
        if self.fail_uniform {
            return Err(RenderError::OutOfMemory);
        }
        Ok(UniformHandle(self.uniforms.insert(Mat4::IDENTITY)))
    }

    fn write_transform(
        &mut self,
        uniform: UniformHandle,
        transform: &Mat4,
    ) -> Result<(), RenderError> {
        *self.uniforms.get_mut(uniform.index())? = *transform;
        Ok(())
    }

    fn create_texture(
        &mut self,
        _label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        Ok(TextureHandle(self.textures.insert((width, height))))
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineHandle, RenderError> {
        if self.fail_pipeline.as_deref() == Some(desc.label.as_str()) {
            return Err(RenderError::PipelineCreation {
                label: desc.label.clone(),
                reason: "forced failure".to_string(),
            });
        }
        Ok(PipelineHandle(self.pipelines.insert(desc.clone())))
    }

    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError> {
        if call.vertex_count == 0 {
            return Ok(());
        }
        let pipeline = self.pipelines.get(call.pipeline.index())?;
        pipeline.shader.check_texture(&pipeline.label, call.texture)?;
        self.buffers.get(call.vertices.index())?;
        self.uniforms.get(call.transform.index())?;
        if let Some(texture) = call.texture {
            self.textures.get(texture.index())?;
        }
        self.pending.push(call);
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.frames_begun += 1;
        self.pending.clear();
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if std::mem::take(&mut self.fail_present) {
            self.pending.clear();
            return Err(RenderError::OutOfMemory);
        }
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }

    fn resize_targets(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_pixels(width, height);
        self.resizes.push((width, height));
    }

    fn release(&mut self, resource: Resource) -> Result<(), RenderError> {
        let result = match resource {
            Resource::Buffer(h) => self.buffers.remove(h.index()).map(drop),
            Resource::Uniform(h) => self.uniforms.remove(h.index()).map(drop),
            Resource::Texture(h) => self.textures.remove(h.index()).map(drop),
            Resource::Pipeline(h) => self.pipelines.remove(h.index()).map(drop),
        };
        if result.is_err() {
            self.failed_releases += 1;
        }
        result
    }
}
