use std::collections::{BTreeSet, HashMap, HashSet};
use naga::{
    front::glsl::{Frontend, Options},
    valid::{Capabilities, ValidationFlags, Validator},
    Binding, Expression, Function, GlobalVariable, Handle, Module, ShaderStage, Statement, TypeInner,
};
use crate::renderer::error::{ShaderError, StageKind};
use crate::renderer::resources::vertex::{VertexShaderAttribute, VertexShaderLayout};

/// Both stages of a program, preprocessed and validated, ready to hand to the device
pub struct CompiledProgram {
    pub vertex_source: String,
    pub fragment_source: String,
    pub vertex_module: Module,
    pub fragment_module: Module,
    pub input_layout: VertexShaderLayout,
}

impl StageKind {
    fn define(&self) -> &'static str {
        match self {
            Self::Vertex => "VERTEX",
            Self::Fragment => "FRAGMENT",
        }
    }

    fn naga_stage(&self) -> ShaderStage {
        match self {
            Self::Vertex => ShaderStage::Vertex,
            Self::Fragment => ShaderStage::Fragment,
        }
    }
}

/// Builds the text of one stage: the version line, the program and stage defines, then the body.
/// A `#version` directive already present in `source` is kept and the defines are placed after it.
pub fn stage_source(source: &str, version_line: &str, name: &str, stage: StageKind) -> String {
    let (version, body) = match source.trim_start().strip_prefix("#version") {
        Some(rest) => {
            let (line, body) = rest.split_once('\n').unwrap_or((rest, ""));
            (format!("#version{}", line.trim_end()), body)
        }
        None => (version_line.to_owned(), source),
    };

    format!(
        "{version}\n#define {name} 1\n#define {} 1\n{body}",
        stage.define(),
    )
}

/// Compiles the vertex and fragment stage of `name` from one shared source text
pub fn compile_program(source: &str, version_line: &str, name: &str) -> Result<CompiledProgram, ShaderError> {
    let vertex_source = stage_source(source, version_line, name, StageKind::Vertex);
    let fragment_source = stage_source(source, version_line, name, StageKind::Fragment);

    let vertex_module = compile_stage(&vertex_source, name, StageKind::Vertex)?;
    let fragment_module = compile_stage(&fragment_source, name, StageKind::Fragment)?;

    link(&vertex_module, &fragment_module, name)?;
    let input_layout = reflect_vertex_inputs(&vertex_module, name)?;

    Ok(CompiledProgram {
        vertex_source,
        fragment_source,
        vertex_module,
        fragment_module,
        input_layout,
    })
}

fn compile_stage(source: &str, name: &str, stage: StageKind) -> Result<Module, ShaderError> {
    // Parse the GLSL text into IR
    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(stage.naga_stage()), source)
        .map_err(|e| ShaderError::Compile {
            stage,
            name: name.to_owned(),
            details: e
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        })?;

    // Validate the IR
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator.validate(&module).map_err(|e| ShaderError::Validation {
        stage,
        name: name.to_owned(),
        details: e.into_inner().to_string(),
    })?;

    Ok(module)
}

fn entry_point<'a>(module: &'a Module, name: &str, stage: StageKind) -> Result<&'a naga::EntryPoint, ShaderError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga_stage())
        .ok_or_else(|| ShaderError::MissingEntryPoint {
            stage,
            name: name.to_owned(),
        })
}

/// Locations written by the vertex stage, including members of a struct result
fn output_locations(module: &Module, ep: &naga::EntryPoint) -> BTreeSet<u32> {
    let mut locations = BTreeSet::new();
    let Some(result) = &ep.function.result else {
        return locations;
    };

    match (&result.binding, &module.types[result.ty].inner) {
        (Some(Binding::Location { location, .. }), _) => {
            locations.insert(*location);
        }
        (None, TypeInner::Struct { members, .. }) => {
            for member in members {
                if let Some(Binding::Location { location, .. }) = member.binding {
                    locations.insert(location);
                }
            }
        }
        _ => {}
    }
    locations
}

/// Global variable a pointer expression ultimately refers to, looking through member and index accesses
fn pointer_global(function: &Function, mut pointer: Handle<Expression>) -> Option<Handle<GlobalVariable>> {
    loop {
        match function.expressions[pointer] {
            Expression::GlobalVariable(global) => return Some(global),
            Expression::Access { base, .. } | Expression::AccessIndex { base, .. } => pointer = base,
            _ => return None,
        }
    }
}

/// Globals loaded anywhere outside the entry points
fn loaded_globals(module: &Module) -> HashSet<Handle<GlobalVariable>> {
    let mut loaded = HashSet::new();
    for (_, function) in module.functions.iter() {
        for (_, expression) in function.expressions.iter() {
            if let Expression::Load { pointer } = *expression {
                loaded.extend(pointer_global(function, pointer));
            }
        }
    }
    loaded
}

/// The GLSL frontend wraps `main` in an entry point that copies each argument into a private
/// global before calling it. Maps argument index to that global.
fn argument_globals(ep: &naga::EntryPoint) -> HashMap<u32, Handle<GlobalVariable>> {
    let function = &ep.function;
    let mut globals = HashMap::new();
    for statement in function.body.iter() {
        let Statement::Store { pointer, value } = *statement else {
            continue;
        };
        if let (Expression::FunctionArgument(index), Some(global)) =
            (&function.expressions[value], pointer_global(function, pointer))
        {
            globals.insert(*index, global);
        }
    }
    globals
}

/// `(location, type, name)` of every active located entry point argument, flattening struct arguments.
/// An argument copied into a global that nothing loads is inactive.
fn active_inputs<'a>(module: &'a Module, ep: &'a naga::EntryPoint) -> Vec<(u32, Handle<naga::Type>, Option<&'a str>)> {
    let copied_to = argument_globals(ep);
    let loaded = loaded_globals(module);

    let mut inputs = Vec::new();
    for (index, arg) in ep.function.arguments.iter().enumerate() {
        let inactive = copied_to
            .get(&(index as u32))
            .is_some_and(|global| !loaded.contains(global));
        if inactive {
            log::debug!("Skipping inactive input `{}`", arg.name.as_deref().unwrap_or("<unnamed>"));
            continue;
        }

        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(Binding::Location { location, .. }), _) => {
                inputs.push((*location, arg.ty, arg.name.as_deref()));
            }
            (None, TypeInner::Struct { members, .. }) => {
                for member in members {
                    if let Some(Binding::Location { location, .. }) = member.binding {
                        inputs.push((location, member.ty, member.name.as_deref()));
                    }
                }
            }
            _ => {}
        }
    }
    inputs
}

/// Checks that every input the fragment stage reads is written by the vertex stage
fn link(vertex: &Module, fragment: &Module, name: &str) -> Result<(), ShaderError> {
    let vertex_ep = entry_point(vertex, name, StageKind::Vertex)?;
    let fragment_ep = entry_point(fragment, name, StageKind::Fragment)?;

    let provided = output_locations(vertex, vertex_ep);
    let missing: Vec<String> = active_inputs(fragment, fragment_ep)
        .into_iter()
        .filter(|(location, _, _)| !provided.contains(location))
        .map(|(location, _, input)| format!("`{}` at location {location}", input.unwrap_or("<unnamed>")))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShaderError::Link {
            name: name.to_owned(),
            details: format!("fragment inputs not written by the vertex stage: {}", missing.join(", ")),
        })
    }
}

/// Reflects the active inputs of the vertex entry point, the ones its code actually reads
pub fn reflect_vertex_inputs(module: &Module, name: &str) -> Result<VertexShaderLayout, ShaderError> {
    let ep = entry_point(module, name, StageKind::Vertex)?;

    let mut layout = VertexShaderLayout::default();
    for (location, ty, input) in active_inputs(module, ep) {
        let input = input.unwrap_or("<unnamed>").to_owned();
        let component_count = match module.types[ty].inner {
            TypeInner::Scalar(_) => 1,
            TypeInner::Vector { size, .. } => size as u8,
            _ => {
                return Err(ShaderError::UnsupportedInput {
                    name: name.to_owned(),
                    input,
                });
            }
        };
        let location = u8::try_from(location).map_err(|_| ShaderError::UnsupportedInput {
            name: name.to_owned(),
            input: input.clone(),
        })?;

        layout.attributes.push(VertexShaderAttribute {
            location,
            component_count,
            name: input,
        });
    }
    layout.attributes.sort_by_key(|a| a.location);

    Ok(layout)
}
