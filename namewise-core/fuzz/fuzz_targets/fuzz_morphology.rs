#![no_main]

use libfuzzer_sys::fuzz_target;
use namewise_core::{CaseMode, Morphology, SymbolTable};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let input = String::from_utf8_lossy(data);
    let morphology = Morphology::default();

    for name in input.lines().take(20) {
        let name: String = name.chars().take(100).collect();
        let _ = morphology.pluralize(&name, CaseMode::Ordinal, &["List", "Array"]);
        let _ = morphology.pluralize(&name, CaseMode::OrdinalIgnoreCase, &["collection"]);
        let _ = morphology.try_make_verb(&name);
        let _ = morphology.make_gerund(&name);
        let _ = morphology.strip_entity_marker(&name);
        let _ = morphology.expand_abbreviations(&name);
        let _ = morphology.replace_number_slang(&name);
    }

    let _ = SymbolTable::from_json(&input, morphology.cache());
});
