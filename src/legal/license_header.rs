//! Renders `license.gen.h`.
//!
//! All file globs and copyright lines are flattened into one string array;
//! each part refers into it by start index and count.

use super::copyright::CopyrightLedger;
use crate::cxx::{escape_string, GENERATED_BANNER};

const STRUCT_DECLS: &str = "struct ComponentCopyrightPart {\n\
\tconst char *license;\n\
\tconst char *const *files;\n\
\tconst char *const *copyright_statements;\n\
\tint file_count;\n\
\tint copyright_count;\n\
};\n\n\
struct ComponentCopyright {\n\
\tconst char *name;\n\
\tconst ComponentCopyrightPart *parts;\n\
\tint part_count;\n\
};\n\n";

/// Index of a part's files and copyright lines in `COPYRIGHT_INFO_DATA`.
struct PartIndex {
    files: usize,
    copyright: usize,
}

pub fn render_license_header(ledger: &CopyrightLedger, license_text: &str) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push_str("#ifndef _EDITOR_LICENSE_H\n");
    out.push_str("#define _EDITOR_LICENSE_H\n");

    out.push_str("const char *const GODOT_LICENSE_TEXT =");
    for line in license_text.lines() {
        out.push_str(&format!("\n\t\t\"{}\\n\"", escape_string(line.trim())));
    }
    out.push_str(";\n\n");

    out.push_str(STRUCT_DECLS);

    let mut data: Vec<&str> = Vec::new();
    let mut indexes: Vec<PartIndex> = Vec::new();
    for project in &ledger.projects {
        for part in &project.parts {
            let files = data.len();
            data.extend(part.files.iter().map(String::as_str));
            let copyright = data.len();
            data.extend(part.copyright.iter().map(String::as_str));
            indexes.push(PartIndex { files, copyright });
        }
    }

    out.push_str("const char *const COPYRIGHT_INFO_DATA[] = {\n");
    for line in &data {
        out.push_str(&format!("\t\"{}\",\n", escape_string(line)));
    }
    out.push_str("};\n\n");

    out.push_str("const ComponentCopyrightPart COPYRIGHT_PROJECT_PARTS[] = {\n");
    let mut project_offsets = Vec::with_capacity(ledger.projects.len());
    let mut index = indexes.iter();
    let mut part_index = 0;
    for project in &ledger.projects {
        project_offsets.push(part_index);
        for (part, at) in project.parts.iter().zip(&mut index) {
            out.push_str(&format!(
                "\t{{ \"{}\", &COPYRIGHT_INFO_DATA[{}], &COPYRIGHT_INFO_DATA[{}], {}, {} }},\n",
                escape_string(&part.license),
                at.files,
                at.copyright,
                part.files.len(),
                part.copyright.len()
            ));
            part_index += 1;
        }
    }
    out.push_str("};\n\n");

    out.push_str(&format!(
        "const int COPYRIGHT_INFO_COUNT = {};\n",
        ledger.projects.len()
    ));
    out.push_str("const ComponentCopyright COPYRIGHT_INFO[] = {\n");
    for (project, offset) in ledger.projects.iter().zip(&project_offsets) {
        out.push_str(&format!(
            "\t{{ \"{}\", &COPYRIGHT_PROJECT_PARTS[{}], {} }},\n",
            escape_string(&project.name),
            offset,
            project.parts.len()
        ));
    }
    out.push_str("};\n\n");

    out.push_str(&format!(
        "const int LICENSE_COUNT = {};\n",
        ledger.licenses.len()
    ));
    out.push_str("const char *const LICENSE_NAMES[] = {\n");
    for license in &ledger.licenses {
        out.push_str(&format!("\t\"{}\",\n", escape_string(&license.name)));
    }
    out.push_str("};\n\n");

    out.push_str("const char *const LICENSE_BODIES[] = {\n\n");
    for license in &ledger.licenses {
        for line in &license.body {
            if line == "." {
                out.push_str("\t\"\\n\"\n");
            } else {
                out.push_str(&format!("\t\"{}\\n\"\n", escape_string(line)));
            }
        }
        out.push_str("\t\"\",\n\n");
    }
    out.push_str("};\n\n");

    out.push_str("#endif\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legal::copyright::parse_copyright;

    const LEDGER: &str = "\
Files: ./*
Comment: Godot Engine
Copyright: 2014-2022, Juan Linietsky.
 2014-2022, Godot Engine contributors.
License: Expat

Files: ./thirdparty/zlib/
Comment: zlib
Copyright: 1995-2017, Jean-loup Gailly and Mark Adler
License: Zlib

License: Zlib
 This software is provided 'as-is'.
 .
 Jean-loup Gailly
";

    #[test]
    fn test_renders_full_header() {
        let ledger = parse_copyright(LEDGER).unwrap();
        let header = render_license_header(&ledger, "Copyright (c) \"Godot\"\n\nPermission\n");
        let expected = concat!(
            "/* THIS FILE IS GENERATED DO NOT EDIT */\n",
            "#ifndef _EDITOR_LICENSE_H\n",
            "#define _EDITOR_LICENSE_H\n",
            "const char *const GODOT_LICENSE_TEXT =\n",
            "\t\t\"Copyright (c) \\\"Godot\\\"\\n\"\n",
            "\t\t\"\\n\"\n",
            "\t\t\"Permission\\n\";\n",
            "\n",
            "struct ComponentCopyrightPart {\n",
            "\tconst char *license;\n",
            "\tconst char *const *files;\n",
            "\tconst char *const *copyright_statements;\n",
            "\tint file_count;\n",
            "\tint copyright_count;\n",
            "};\n",
            "\n",
            "struct ComponentCopyright {\n",
            "\tconst char *name;\n",
            "\tconst ComponentCopyrightPart *parts;\n",
            "\tint part_count;\n",
            "};\n",
            "\n",
            "const char *const COPYRIGHT_INFO_DATA[] = {\n",
            "\t\"./*\",\n",
            "\t\"2014-2022, Juan Linietsky.\",\n",
            "\t\"2014-2022, Godot Engine contributors.\",\n",
            "\t\"./thirdparty/zlib/\",\n",
            "\t\"1995-2017, Jean-loup Gailly and Mark Adler\",\n",
            "};\n",
            "\n",
            "const ComponentCopyrightPart COPYRIGHT_PROJECT_PARTS[] = {\n",
            "\t{ \"Expat\", &COPYRIGHT_INFO_DATA[0], &COPYRIGHT_INFO_DATA[1], 1, 2 },\n",
            "\t{ \"Zlib\", &COPYRIGHT_INFO_DATA[3], &COPYRIGHT_INFO_DATA[4], 1, 1 },\n",
            "};\n",
            "\n",
            "const int COPYRIGHT_INFO_COUNT = 2;\n",
            "const ComponentCopyright COPYRIGHT_INFO[] = {\n",
            "\t{ \"Godot Engine\", &COPYRIGHT_PROJECT_PARTS[0], 1 },\n",
            "\t{ \"zlib\", &COPYRIGHT_PROJECT_PARTS[1], 1 },\n",
            "};\n",
            "\n",
            "const int LICENSE_COUNT = 1;\n",
            "const char *const LICENSE_NAMES[] = {\n",
            "\t\"Zlib\",\n",
            "};\n",
            "\n",
            "const char *const LICENSE_BODIES[] = {\n",
            "\n",
            "\t\"This software is provided 'as-is'.\\n\"\n",
            "\t\"\\n\"\n",
            "\t\"Jean-loup Gailly\\n\"\n",
            "\t\"\",\n",
            "\n",
            "};\n",
            "\n",
            "#endif\n",
        );
        assert_eq!(header, expected);
    }

    #[test]
    fn test_empty_ledger_still_declares_arrays() {
        let header = render_license_header(&CopyrightLedger::default(), "");
        assert!(header.contains("const char *const GODOT_LICENSE_TEXT =;\n\n"));
        assert!(header.contains("const int COPYRIGHT_INFO_COUNT = 0;\n"));
        assert!(header.contains("const int LICENSE_COUNT = 0;\n"));
        assert!(header.ends_with("#endif\n"));
    }
}
