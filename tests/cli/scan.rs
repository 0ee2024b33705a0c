use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const MESSAGES: &str = r#"{
  "cancel": "取消",
  "selectAll": "全选",
  "cancelSelectAll": "@:cancel@:selectAll",
  "user": { "add": "新增用户", "edit": "编辑用户", "check": "查看用户" }
}"#;

const USER_PAGE: &str = r#"<template>
  <UserTable />
</template>

<script lang="ts">
export const route = { name: 'user', path: '/system/user', label: '用户管理' }
</script>

<script setup lang="ts">
import UserTable from './components/UserTable.vue'
import { useUserApi } from '@/api/user'

const addBtn = { code: 'system:user:add', label: i18n.t('user.add') }
</script>
"#;

const USER_TABLE: &str = r#"<script setup lang="ts">
import { computed } from 'vue'
import { useUserApi } from '~/api/user'

const i18nVal = computed(() => ({
  check: $i18n.t('user.check'),
  edit: $i18n.t('user.edit') as string,
}))

const actions = [
  { code: 'system:user:edit', label: i18nVal.value.edit },
  { code: 'system:user:check', label: i18nVal.value.check },
]
</script>
"#;

const USER_API: &str = r#"
export function useUserApi() {
  const batch = { code: 'system:user:batch', label: i18n.t('cancelSelectAll') }
  return { batch }
}
"#;

fn user_project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("src/i18n/locale/zh-CN.json", MESSAGES),
        ("src/views/system/user/index.vue", USER_PAGE),
        ("src/views/system/user/components/UserTable.vue", USER_TABLE),
        ("src/api/user.ts", USER_API),
        ("src/assets/icons.ts", "export const icon = { code: 'asset', label: 'Asset' }"),
    ])
}

fn codes(page: &Value) -> Vec<(String, String)> {
    page["codeItems"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["code"].as_str().unwrap().to_string(),
                item["label"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_scan_writes_artifact() -> Result<()> {
    let test = user_project()?;

    let output = test.scan_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Scanned 4 source files - 1 page, 4 codes"));
    assert!(stdout(&output).contains("projectCodePermissions.json"));

    let artifact = test.read_json("projectCodePermissions.json")?;
    let object = artifact.as_object().unwrap();
    assert_eq!(object.len(), 1);

    let page = &artifact[test.id("src/views/system/user/index.vue")];
    assert_eq!(
        page["routeItem"],
        json!({ "name": "user", "path": "/system/user", "label": "用户管理" })
    );
    assert_eq!(
        codes(page),
        vec![
            ("system:user:add".to_string(), "新增用户".to_string()),
            ("system:user:edit".to_string(), "编辑用户".to_string()),
            ("system:user:check".to_string(), "查看用户".to_string()),
            ("system:user:batch".to_string(), "取消全选".to_string()),
        ]
    );

    Ok(())
}

#[test]
fn test_scan_is_stable() -> Result<()> {
    let test = user_project()?;

    test.scan_command().output()?;
    let first = test.read_file("projectCodePermissions.json")?;
    test.scan_command().output()?;
    let second = test.read_file("projectCodePermissions.json")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_scan_to_stdout() -> Result<()> {
    let test = user_project()?;

    let output = test.scan_command().arg("--stdout").output()?;

    assert!(output.status.success());
    let artifact: Value = serde_json::from_str(&stdout(&output))?;
    assert!(artifact.get(test.id("src/views/system/user/index.vue")).is_some());
    assert!(stderr(&output).contains("Scanned 4 source files"));
    assert!(!test.root().join("projectCodePermissions.json").exists());

    Ok(())
}

#[test]
fn test_scan_from_other_directory() -> Result<()> {
    let test = user_project()?;
    let elsewhere = tempfile::TempDir::new()?;

    let output = test
        .command()
        .current_dir(elsewhere.path())
        .arg("scan")
        .arg("--source-root")
        .arg(test.root())
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.root().join("projectCodePermissions.json").exists());

    Ok(())
}

#[test]
fn test_output_and_messages_overrides() -> Result<()> {
    let test = user_project()?;
    test.write_file("locales/en.json", r#"{ "user": { "add": "Add user" } }"#)?;

    let output = test
        .scan_command()
        .args(["--output", "dist/auth.json", "--messages", "locales/en.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let artifact = test.read_json("dist/auth.json")?;
    let page = &artifact[test.id("src/views/system/user/index.vue")];
    assert_eq!(codes(page)[0], ("system:user:add".to_string(), "Add user".to_string()));
    assert_eq!(codes(page)[1].1, "user.edit");

    Ok(())
}

#[test]
fn test_config_file_is_used() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".codeauthrc.json",
            r##"{
  "includes": ["app"],
  "outputFile": "build/codes.json",
  "aliases": [{ "prefix": "#", "target": "app/shared" }]
}"##,
        ),
        (
            "app/pages/home.vue",
            r#"<script lang="ts">
import { toolbar } from '#/toolbar'
export const route = { name: 'home', path: '/' }
</script>"#,
        ),
        (
            "app/shared/toolbar.ts",
            "export const toolbar = { code: 'home:export', label: 'Export' }",
        ),
        ("src/ignored.ts", "export const x = { code: 'never', label: 'Never' }"),
    ])?;

    let output = test.scan_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let artifact = test.read_json("build/codes.json")?;
    assert_eq!(
        codes(&artifact[test.id("app/pages/home.vue")]),
        vec![("home:export".to_string(), "Export".to_string())]
    );
    assert!(stdout(&output).contains("Scanned 2 source files"));

    Ok(())
}

#[test]
fn test_parse_error_exit_code() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "src/views/page.vue",
            r#"<script lang="ts">
export const route = { name: 'page' }
const ok = { code: 'page:ok', label: 'Ok' }
</script>"#,
        ),
        ("src/broken.ts", "export const = {"),
    ])?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: Failed to parse"));
    assert!(stderr(&output).contains("broken.ts"));
    assert!(stdout(&output).contains("1 could not be parsed"));

    let artifact = test.read_json("projectCodePermissions.json")?;
    assert_eq!(
        codes(&artifact[test.id("src/views/page.vue")]),
        vec![("page:ok".to_string(), "Ok".to_string())]
    );

    Ok(())
}

#[test]
fn test_missing_messages_warns() -> Result<()> {
    let test = CliTest::with_files(&[(
        "src/views/page.vue",
        r#"<script setup lang="ts">
const add = { code: 'page:add', label: i18n.t('page.add') }
</script>
<script lang="ts">export const route = { name: 'page' }</script>"#,
    )])?;

    let output = test.scan_command().output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: Translation table not loaded"));
    let artifact = test.read_json("projectCodePermissions.json")?;
    assert_eq!(
        codes(&artifact[test.id("src/views/page.vue")]),
        vec![("page:add".to_string(), "page.add".to_string())]
    );

    Ok(())
}

#[test]
fn test_label_cycle_warns() -> Result<()> {
    let test = CliTest::with_files(&[
        ("src/i18n/locale/zh-CN.json", r#"{ "a": "@:b", "b": "@:a" }"#),
        (
            "src/views/page.vue",
            r#"<script lang="ts">
export const route = { name: 'page' }
const btn = { code: 'page:a', label: i18n.t('a') }
</script>"#,
        ),
    ])?;

    let output = test.scan_command().output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("warning: Translation reference cycle while resolving \"a\""));
    let artifact = test.read_json("projectCodePermissions.json")?;
    assert_eq!(
        codes(&artifact[test.id("src/views/page.vue")]),
        vec![("page:a".to_string(), "a".to_string())]
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_files(&[(
        ".codeauthrc.json",
        r#"{ "aliases": [{ "prefix": "@/", "target": "src" }] }"#,
    )])?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must not end with '/'"));

    Ok(())
}

#[test]
fn test_missing_source_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.scan_command().args(["--source-root", "nope"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source root is not a directory"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("scan"));
    assert!(stdout(&output).contains("init"));

    Ok(())
}
