//! Module registry
//!
//! Each enabled engine module gets an include, a register call and an
//! unregister call, all guarded by its `MODULE_<NAME>_ENABLED` define.

use crate::cxx::GENERATED_BANNER;

fn enabled_define(name: &str) -> String {
    format!("MODULE_{}_ENABLED", name.to_uppercase())
}

fn guarded_call(name: &str, call: &str) -> String {
    format!(
        "#ifdef {}\n\t{}_{}_types();\n#endif\n",
        enabled_define(name),
        call,
        name
    )
}

/// Render `register_module_types.gen.cpp`.
pub fn render_register_module_types<S: AsRef<str>>(modules: &[S]) -> String {
    let mut includes = String::new();
    let mut register = String::new();
    let mut unregister = String::new();
    for name in modules.iter().map(AsRef::as_ref) {
        includes.push_str(&format!(
            "#include \"modules/{}/register_types.h\"\n",
            name
        ));
        register.push_str(&guarded_call(name, "register"));
        unregister.push_str(&guarded_call(name, "unregister"));
    }

    format!(
        "// register_module_types.gen.cpp\n\
         {}#include \"register_module_types.h\"\n\
         \n\
         #include \"modules/modules_enabled.gen.h\"\n\
         \n\
         {}\n\
         \n\
         void register_module_types() {{\n\
         {}\n\
         }}\n\
         \n\
         void unregister_module_types() {{\n\
         {}\n\
         }}\n",
        GENERATED_BANNER, includes, register, unregister
    )
}

/// Render `modules_enabled.gen.h`.
pub fn render_modules_enabled<S: AsRef<str>>(modules: &[S]) -> String {
    modules
        .iter()
        .map(|name| format!("#define {}\n", enabled_define(name.as_ref())))
        .collect()
}
