use smallvec::SmallVec;

/// One attribute stored in a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferAttribute {
    pub location: u8,
    pub component_count: u8,
    /// Byte offset of the attribute within one vertex
    pub offset: u8,
}

/// Interleaved layout of a vertex buffer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VertexBufferLayout {
    pub attributes: SmallVec<[VertexBufferAttribute; 8]>,
    pub stride: u8,
}

impl VertexBufferLayout {
    /// Builds a tightly packed `f32` layout from `(location, component_count)` pairs
    pub fn packed_f32(attributes: &[(u8, u8)]) -> Self {
        let mut layout = Self::default();
        let mut offset = 0u8;
        for &(location, component_count) in attributes {
            layout.attributes.push(VertexBufferAttribute {
                location,
                component_count,
                offset,
            });
            offset += component_count * size_of::<f32>() as u8;
        }
        layout.stride = offset;
        layout
    }

    pub fn find(&self, location: u8) -> Option<&VertexBufferAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }
}

/// One active input of a vertex shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexShaderAttribute {
    pub location: u8,
    pub component_count: u8,
    pub name: String,
}

/// Active inputs of a vertex shader, ordered by location
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VertexShaderLayout {
    pub attributes: SmallVec<[VertexShaderAttribute; 8]>,
}

impl VertexShaderLayout {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn find(&self, location: u8) -> Option<&VertexShaderAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout_offsets_and_stride() {
        let layout = VertexBufferLayout::packed_f32(&[(0, 3), (1, 2)]);

        assert_eq!(layout.stride, 20);
        assert_eq!(layout.find(0).map(|a| a.offset), Some(0));
        assert_eq!(layout.find(1).map(|a| a.offset), Some(12));
        assert!(layout.find(2).is_none());
    }

    #[test]
    fn locations_need_not_be_contiguous() {
        let layout = VertexBufferLayout::packed_f32(&[(0, 3), (5, 4)]);

        assert_eq!(layout.find(5).map(|a| (a.component_count, a.offset)), Some((4, 12)));
        assert_eq!(layout.stride, 28);
    }
}
