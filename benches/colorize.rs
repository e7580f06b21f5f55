//! Benchmarks for the incremental colorizer
//!
//! Run with: cargo bench --bench colorize

use token_core::editable::{Coordinates, TextEditor};
use token_core::syntax::LanguageDefinition;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Sample sources
// ============================================================================

const GLSL_SAMPLE: &str = r#"#version 330 core
/* Phong lighting
   with a single light */
uniform vec3 lightPos;
in vec3 normal;
out vec4 color;

void main() {
    // diffuse term
    float d = max(dot(normalize(normal), normalize(lightPos)), 0.0);
    color = vec4(vec3(d), 1.0);
}
"#;

const C_SAMPLE: &str = r#"#include <stdio.h>
/* entry point */
int main(int argc, char **argv) {
    const char *name = argc > 1 ? argv[1] : "world";
    printf("hello, %s\n", name); // greet
    return 0;
}
"#;

fn editor_for(definition: LanguageDefinition, sample: &str, repeat: usize) -> TextEditor {
    let mut editor = TextEditor::new();
    editor
        .set_language_definition(definition)
        .expect("built-in definition compiles");
    editor.set_text(&sample.repeat(repeat));
    editor
}

// ============================================================================
// Full document
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn colorize_glsl_regex_rules(bencher: divan::Bencher, repeat: usize) {
    bencher
        .with_inputs(|| editor_for(LanguageDefinition::glsl(), GLSL_SAMPLE, repeat))
        .bench_local_values(|mut editor| {
            editor.colorize_all();
            divan::black_box(editor)
        });
}

#[divan::bench(args = [10, 100, 1000])]
fn colorize_c_native_tokenizer(bencher: divan::Bencher, repeat: usize) {
    bencher
        .with_inputs(|| editor_for(LanguageDefinition::c(), C_SAMPLE, repeat))
        .bench_local_values(|mut editor| {
            editor.colorize_all();
            divan::black_box(editor)
        });
}

// ============================================================================
// Incremental recolor after an edit
// ============================================================================

#[divan::bench(args = [100, 1000])]
fn recolor_after_keystroke(bencher: divan::Bencher, repeat: usize) {
    let mut editor = editor_for(LanguageDefinition::glsl(), GLSL_SAMPLE, repeat);
    editor.colorize_all();
    let middle = editor.line_count() / 2;
    editor.set_cursor_position(Coordinates::new(middle, 0));

    bencher.bench_local(|| {
        editor.enter_character('x', false);
        editor.colorize_all();
        editor.backspace();
        editor.colorize_all();
    });
}

#[divan::bench(args = [100, 1000])]
fn single_step(bencher: divan::Bencher, repeat: usize) {
    bencher
        .with_inputs(|| editor_for(LanguageDefinition::glsl(), GLSL_SAMPLE, repeat))
        .bench_local_values(|mut editor| {
            divan::black_box(editor.colorize_step());
            editor
        });
}
