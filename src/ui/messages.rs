//! Console message tables

use serde::{Deserialize, Serialize};

/// Language of console messages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

/// Every user-facing line printed during a run
#[derive(Debug)]
pub struct Messages {
    pub start_restructuring: &'static str,
    pub source_dir_not_exist: &'static str,
    pub reference_dir_not_exist: &'static str,
    pub getting_reference_files: &'static str,
    pub found_reference_files: &'static str,
    pub getting_source_files: &'static str,
    pub found_source_files: &'static str,
    pub processing_remaining_files: &'static str,
    pub restructuring_complete: &'static str,
    pub copied_files: &'static str,
    pub generated_structure: &'static str,
    pub copying_file: &'static str,
    pub to: &'static str,
    pub plan_header: &'static str,
    pub dry_run_notice: &'static str,
    pub collisions: &'static str,
    pub ambiguous_name: &'static str,
    pub nothing_to_copy: &'static str,
}

static EN: Messages = Messages {
    start_restructuring: "Starting file restructuring...",
    source_dir_not_exist: "Error: Source directory does not exist:",
    reference_dir_not_exist: "Error: Reference directory does not exist:",
    getting_reference_files: "Getting reference files...",
    found_reference_files: "Found reference files:",
    getting_source_files: "Getting source files...",
    found_source_files: "Found source files:",
    processing_remaining_files: "Processing remaining files...",
    restructuring_complete: "File restructuring complete! Copied files to:",
    copied_files: "Total files copied:",
    generated_structure: "Generated directory structure:",
    copying_file: "Copying file:",
    to: "to",
    plan_header: "Plan:",
    dry_run_notice: "Dry-run mode: no files were copied.",
    collisions: "Files sharing a destination (later copy wins):",
    ambiguous_name: "Name claimed by several reference directories:",
    nothing_to_copy: "No source files to copy.",
};

static ZH: Messages = Messages {
    start_restructuring: "开始调整文件结构...",
    source_dir_not_exist: "错误：源目录不存在：",
    reference_dir_not_exist: "错误：参考目录不存在：",
    getting_reference_files: "正在获取参考文件...",
    found_reference_files: "找到参考文件：",
    getting_source_files: "正在获取源文件...",
    found_source_files: "找到源文件：",
    processing_remaining_files: "正在处理剩余文件...",
    restructuring_complete: "文件结构调整完成！文件已复制到：",
    copied_files: "共复制文件：",
    generated_structure: "生成的目录结构：",
    copying_file: "复制文件：",
    to: "到",
    plan_header: "计划：",
    dry_run_notice: "试运行模式：未复制任何文件。",
    collisions: "目标路径重复的文件（后复制的覆盖先复制的）：",
    ambiguous_name: "多个参考目录包含同名文件：",
    nothing_to_copy: "没有需要复制的源文件。",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}
