// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

fn type_label<Content>() -> &'static str {
    let type_name = std::any::type_name::<Content>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Rounds `size` up to the next multiple of `alignment`
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Typed uniform buffer holding a single `Content`
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", type_label::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content (skips the write when nothing changed)
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: &Content) {
        let new_content = bytemuck::bytes_of(content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Uniform buffer of `Content` slots addressed by dynamic offset.
///
/// Slots are spaced by the device's `min_uniform_buffer_offset_alignment`.
/// The buffer grows (doubling) when a frame needs more slots than it holds.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<Content>() as u64, alignment);
        let capacity = capacity.max(1);

        Self {
            buffer: Self::create_buffer(device, stride, capacity),
            content_type: PhantomData,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!(
                "DynamicUniformBuffer<{}> x{}",
                type_label::<Content>(),
                capacity
            )),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Writes `slots` starting at slot 0.
    ///
    /// Returns `true` when the buffer had to be reallocated; bind groups
    /// referencing the old buffer must then be rebuilt.
    pub fn write_slots(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        slots: &[Content],
    ) -> bool {
        let mut grown = false;
        if slots.len() > self.capacity {
            while self.capacity < slots.len() {
                self.capacity *= 2;
            }
            log::debug!(
                "growing {} slot buffer to {}",
                type_label::<Content>(),
                self.capacity
            );
            self.buffer = Self::create_buffer(device, self.stride, self.capacity);
            grown = true;
        }

        if slots.is_empty() {
            return grown;
        }

        self.staging.clear();
        self.staging.resize(self.stride as usize * slots.len(), 0);
        for (i, slot) in slots.iter().enumerate() {
            let start = i * self.stride as usize;
            let bytes = bytemuck::bytes_of(slot);
            self.staging[start..start + bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);

        grown
    }

    /// Dynamic offset of `slot`
    pub fn offset(&self, slot: usize) -> u32 {
        (self.stride * slot as u64) as u32
    }

    /// Binding covering one slot; the dynamic offset selects which
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_stride() {
        assert_eq!(aligned_stride(400, 256), 512);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(1, 256), 256);
        assert_eq!(aligned_stride(24, 0), 24);
    }

    #[test]
    fn test_type_label_strips_path() {
        assert_eq!(type_label::<u32>(), "u32");
        assert_eq!(type_label::<std::string::String>(), "String");
    }
}
