//! Rewritten modules run against a memory the host owns.
//!
//! A provider module stands in for the host: it defines one page of
//! memory and exports it. The prepared guest is linked against that
//! memory as `env.memory` and executed with wasmi.

use wasm_encoder::{
    CodeSection, ExportKind, ExportSection, Function, FunctionSection, ImportSection,
    Instruction, MemArg, MemorySection, MemoryType, Module as EncModule, TypeSection, ValType,
};
use wasmi::{Engine, Linker, Module, Store};
use wasmprep_rewrite::{prepare, rewrite, LocalMemoryPolicy, PrepareOptions};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn memory_type(minimum: u64, maximum: Option<u64>) -> MemoryType {
    MemoryType {
        minimum,
        maximum,
        memory64: false,
        shared: false,
        page_size_log2: None,
    }
}

fn mem_arg() -> MemArg {
    MemArg {
        offset: 0,
        align: 2,
        memory_index: 0,
    }
}

/// Host stand-in: one page of memory exported as `memory`.
fn provider_module() -> Vec<u8> {
    let mut module = EncModule::new();
    let mut memories = MemorySection::new();
    memories.memory(memory_type(1, None));
    module.section(&memories);
    let mut exports = ExportSection::new();
    exports.export("memory", ExportKind::Memory, 0);
    module.section(&exports);
    module.finish()
}

/// Guest exporting `store(addr, value)` and `load(addr) -> value`.
///
/// With `imported` the memory is `env.memory` (2..10 pages), otherwise it
/// is declared locally. Either way it is also exported as `mem`.
fn guest_module(imported: bool) -> Vec<u8> {
    let mut module = EncModule::new();

    let mut types = TypeSection::new();
    types.ty().function(vec![ValType::I32, ValType::I32], vec![]);
    types.ty().function(vec![ValType::I32], vec![ValType::I32]);
    module.section(&types);

    if imported {
        let mut imports = ImportSection::new();
        imports.import("env", "memory", memory_type(2, Some(10)));
        module.section(&imports);
    }

    let mut funcs = FunctionSection::new();
    funcs.function(0);
    funcs.function(1);
    module.section(&funcs);

    if !imported {
        let mut memories = MemorySection::new();
        memories.memory(memory_type(1, None));
        module.section(&memories);
    }

    let mut exports = ExportSection::new();
    exports.export("store", ExportKind::Func, 0);
    exports.export("load", ExportKind::Func, 1);
    exports.export("mem", ExportKind::Memory, 0);
    module.section(&exports);

    let mut codes = CodeSection::new();
    let mut store = Function::new(vec![]);
    store.instruction(&Instruction::LocalGet(0));
    store.instruction(&Instruction::LocalGet(1));
    store.instruction(&Instruction::I32Store(mem_arg()));
    store.instruction(&Instruction::End);
    codes.function(&store);
    let mut load = Function::new(vec![]);
    load.instruction(&Instruction::LocalGet(0));
    load.instruction(&Instruction::I32Load(mem_arg()));
    load.instruction(&Instruction::End);
    codes.function(&load);
    module.section(&codes);

    module.finish()
}

/// Instantiate the provider, then the guest linked to the provider's memory.
fn instantiate_with_host_memory(guest: &[u8]) -> (Store<()>, wasmi::Instance, wasmi::Memory) {
    let engine = Engine::default();
    let mut store = Store::new(&engine, ());

    let provider = Module::new(&engine, &provider_module()[..]).expect("failed to parse provider");
    let provider_linker = Linker::<()>::new(&engine);
    let provider = provider_linker
        .instantiate(&mut store, &provider)
        .expect("failed to instantiate provider")
        .start(&mut store)
        .expect("failed to start provider");
    let memory = provider
        .get_memory(&store, "memory")
        .expect("provider exports memory");

    let guest = Module::new(&engine, guest).expect("failed to parse guest");
    let mut linker = Linker::<()>::new(&engine);
    linker
        .define("env", "memory", memory)
        .expect("failed to define env.memory");
    let instance = linker
        .instantiate(&mut store, &guest)
        .expect("failed to instantiate guest")
        .start(&mut store)
        .expect("failed to start guest");
    (store, instance, memory)
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn prepared_guest_writes_into_host_memory() {
    let wasm = rewrite(&guest_module(true)).unwrap();
    let (mut store, instance, memory) = instantiate_with_host_memory(&wasm);

    let store_fn = instance
        .get_typed_func::<(i32, i32), ()>(&store, "store")
        .expect("store export missing");
    store_fn.call(&mut store, (8, 0x1234_5678)).unwrap();

    let mut buf = [0u8; 4];
    memory.read(&store, 8, &mut buf).unwrap();
    assert_eq!(u32::from_le_bytes(buf), 0x1234_5678);
}

#[test]
fn prepared_guest_reads_host_writes() {
    let wasm = rewrite(&guest_module(true)).unwrap();
    let (mut store, instance, memory) = instantiate_with_host_memory(&wasm);

    memory.write(&mut store, 64, &42u32.to_le_bytes()).unwrap();
    let load = instance
        .get_typed_func::<i32, i32>(&store, "load")
        .expect("load export missing");
    assert_eq!(load.call(&mut store, 64).unwrap(), 42);
}

#[test]
fn prepared_guest_no_longer_exports_memory() {
    let wasm = rewrite(&guest_module(true)).unwrap();
    let (store, instance, _) = instantiate_with_host_memory(&wasm);
    assert!(instance.get_memory(&store, "mem").is_none());
    assert!(instance.get_func(&store, "store").is_some());
}

#[test]
fn local_memory_without_import_section_gets_no_canonical_import() {
    // Sections are never inserted, so a module with no import section ends
    // up with no memory at all once its local memory is discarded.
    let options = PrepareOptions::default().with_local_memory(LocalMemoryPolicy::Discard);
    let prepared = prepare(&guest_module(false), &options).unwrap();
    assert_eq!(prepared.stats.local_memories_discarded, 1);
    assert!(!prepared.stats.canonical_import_injected);
    assert!(wasmparser::validate(&prepared.wasm).is_err());
}
