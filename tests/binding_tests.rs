//! Vertex Binding Tests
//!
//! Tests for:
//! - Vertex array reuse per (submesh, program) pair
//! - Attribute matching by location, including programs reading a subset
//! - Missing attribute failure
//! - Frame draws over the embedded quad and an imported model
//! - Inputs a program declares but never reads

mod common;

use tessa::renderer::config::RenderMode;
use tessa::renderer::contexts::device_ctx::{DeviceCommand, GpuHandle};
use tessa::renderer::error::RenderError;

// ============================================================================
// Reflection
// ============================================================================

#[test]
fn loaded_program_reflects_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let id = renderer.load_program(&shaders, "MESH");
    let program = renderer.resources().programs.get(id).unwrap();

    assert!(program.is_valid());
    let inputs: Vec<(u8, u8)> = program
        .input_layout
        .attributes
        .iter()
        .map(|a| (a.location, a.component_count))
        .collect();
    assert_eq!(inputs, vec![(0, 3), (1, 3), (2, 2)]);
}

// ============================================================================
// Cache behaviour
// ============================================================================

#[test]
fn second_frame_reuses_vertex_array() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let quad = renderer.load_program(&shaders, "QUAD");
    renderer.set_quad_program(quad);
    renderer.set_mode(RenderMode::TexturedQuad);

    renderer.draw().unwrap();
    renderer.draw().unwrap();

    let device = renderer.device();
    assert_eq!(device.created_vertex_arrays().len(), 1);
    assert_eq!(device.draw_calls(), vec![(6, 0), (6, 0)]);
}

#[test]
fn program_reading_subset_leaves_other_slots_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let program = renderer.load_program(&shaders, "POSITION_ONLY");
    renderer.set_quad_program(program);
    renderer.set_mode(RenderMode::TexturedQuad);
    renderer.draw().unwrap();

    let device = renderer.device();
    let vao = device.created_vertex_arrays()[0];
    let pointers = device.attrib_pointers(vao);
    assert_eq!(pointers.len(), 1);
    assert_eq!((pointers[0].index, pointers[0].component_count, pointers[0].stride), (0, 3, 20));
    assert!(!device.commands().contains(&DeviceCommand::EnableVertexAttrib { vertex_array: vao, index: 1 }));
}

#[test]
fn two_programs_get_two_vertex_arrays_over_same_buffers() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let quad = renderer.load_program(&shaders, "QUAD");
    let position_only = renderer.load_program(&shaders, "POSITION_ONLY");
    renderer.set_mode(RenderMode::TexturedQuad);

    renderer.set_quad_program(quad);
    renderer.draw().unwrap();
    renderer.set_quad_program(position_only);
    renderer.draw().unwrap();

    let device = renderer.device();
    let buffers: Vec<(GpuHandle, GpuHandle)> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::CreateVertexArray { vertex_buffer, index_buffer, .. } => Some((*vertex_buffer, *index_buffer)),
            _ => None,
        })
        .collect();
    assert_eq!(buffers.len(), 2);
    assert_eq!(buffers[0], buffers[1]);
}

#[test]
fn two_programs_share_buffers_of_imported_model() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let obj = common::write(dir.path(), "panel.obj", common::PANEL_OBJ);
    let mut renderer = common::renderer();

    let mesh = renderer.load_program(&shaders, "MESH");
    let tinted = renderer.load_program(&shaders, "MESH_TINTED");
    let model = renderer.load_model(&obj).unwrap();
    renderer.set_mode(RenderMode::TexturedModel);

    renderer.set_mesh_program(mesh);
    renderer.draw().unwrap();
    renderer.set_mesh_program(tinted);
    renderer.draw().unwrap();
    // Both bindings are cached now
    renderer.set_mesh_program(mesh);
    renderer.draw().unwrap();

    let res = renderer.resources();
    let model_mesh = res.mesh(res.model(model).unwrap().mesh).unwrap();
    let index_count = model_mesh.submeshes[0].indices.len() as u32;
    assert_eq!(model_mesh.submeshes.len(), 1);
    assert_eq!(index_count, 6);
    assert_eq!(model_mesh.binding_count(), 2);
    for program in [mesh, tinted] {
        let handle = res.programs.get(program).unwrap().handle;
        assert!(model_mesh.submeshes[0].binding_for(handle).is_some());
    }

    let device = renderer.device();
    let buffers: Vec<(GpuHandle, GpuHandle)> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::CreateVertexArray { vertex_buffer, index_buffer, .. } => Some((*vertex_buffer, *index_buffer)),
            _ => None,
        })
        .collect();
    assert_eq!(buffers.len(), 2);
    assert_eq!(buffers[0], buffers[1]);
    assert_eq!(device.draw_calls(), vec![(index_count, 0); 3]);
}

// ============================================================================
// Inactive inputs
// ============================================================================

#[test]
fn unread_input_is_not_required_of_the_quad() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let program = renderer.load_program(&shaders, "UNUSED_INPUT");
    let locations: Vec<u8> = renderer
        .resources()
        .programs
        .get(program)
        .unwrap()
        .input_layout
        .attributes
        .iter()
        .map(|a| a.location)
        .collect();
    assert_eq!(locations, vec![0, 1]);

    renderer.set_quad_program(program);
    renderer.set_mode(RenderMode::TexturedQuad);
    renderer.draw().unwrap();

    let device = renderer.device();
    let vao = device.created_vertex_arrays()[0];
    assert_eq!(device.attrib_pointers(vao).len(), 2);
    assert_eq!(device.draw_calls(), vec![(6, 0)]);
}

// ============================================================================
// Failure policy
// ============================================================================

#[test]
fn missing_attribute_fails_the_frame() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let program = renderer.load_program(&shaders, "NEEDS_TANGENT_SIX");
    renderer.set_quad_program(program);
    renderer.set_mode(RenderMode::TexturedQuad);

    let err = renderer.draw();

    assert!(matches!(err, Err(RenderError::MissingAttribute { location: 6, submesh: 0, .. })));
    assert!(renderer.device().draw_calls().is_empty());
    // A second attempt builds a fresh vertex array instead of reusing a broken one
    assert!(renderer.draw().is_err());
    assert_eq!(renderer.device().created_vertex_arrays().len(), 2);
}

#[test]
fn frame_sets_viewport_clears_and_unbinds() {
    let dir = tempfile::tempdir().unwrap();
    let shaders = common::write(dir.path(), "shaders.glsl", common::SHADERS);
    let mut renderer = common::renderer();

    let quad = renderer.load_program(&shaders, "QUAD");
    renderer.set_quad_program(quad);
    renderer.set_mode(RenderMode::TexturedQuad);
    renderer.resize(640, 480);
    renderer.device_mut().clear_commands();
    renderer.draw().unwrap();

    let commands = renderer.device().commands();
    assert_eq!(commands.first(), Some(&DeviceCommand::SetViewport { width: 640, height: 480 }));
    assert!(matches!(commands.get(1), Some(DeviceCommand::Clear { .. })));
    assert_eq!(commands.last(), Some(&DeviceCommand::UseProgram(GpuHandle::NULL)));
    assert_eq!(renderer.frame_index(), 1);
}
