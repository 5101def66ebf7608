//! End-to-end generation from Rust declarations to accessor source text.

use accessor_gen::{GlobalDefaults, RecordType, generate, generate_record, scan_source};
use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

fn record(source: &str) -> Result<RecordType> {
    scan_source(source, &[])?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no record in source"))
}

#[fixture]
fn user() -> Result<RecordType> {
    record(
        r#"
        struct User {
            #[accessor(getter = "*", setter = "*")]
            user_name: String,
            #[accessor(getter = "-")]
            Email: String,
            #[accessor(getter = "GetCache,ref")]
            cache: Cache,
        }
        "#,
    )
}

#[rstest]
fn user_accessors_follow_field_annotations(user: Result<RecordType>) -> Result<()> {
    let code = generate_record(&user?, &GlobalDefaults::default());
    ensure!(code.contains("pub fn UserName(&self) -> String {"), "{code}");
    ensure!(code.contains("self.user_name.clone()"), "{code}");
    ensure!(code.contains("pub fn SetUserName(&mut self, value: String) {"), "{code}");
    ensure!(!code.contains("fn Email("), "opted-out getter emitted:\n{code}");
    ensure!(!code.contains("SetEmail"), "setter emitted without defaults:\n{code}");
    ensure!(code.contains("pub fn GetCache(&self) -> &Cache {"), "{code}");
    ensure!(code.contains("&self.cache\n"), "{code}");
    ensure!(!code.contains("trait "), "unrequested source trait:\n{code}");
    Ok(())
}

#[rstest]
fn opt_out_survives_all_defaults(user: Result<RecordType>) -> Result<()> {
    let mut record = user?;
    record
        .comments
        .push("accessor:all(getter, setter, get_prefix=Get, set_prefix=Set)".to_owned());
    let code = generate_record(&record, &GlobalDefaults::default());
    ensure!(!code.contains("fn Email("), "{code}");
    ensure!(!code.contains("fn GetEmail("), "{code}");
    ensure!(code.contains("pub fn SetEmail(&mut self, value: String)"), "{code}");
    ensure!(code.contains("pub fn UserName(&self)"), "explicit name lost:\n{code}");
    Ok(())
}

#[test]
fn no_directives_and_no_defaults_generate_nothing() -> Result<()> {
    let record = record("struct Plain { id: u64, name: String }")?;
    let code = generate_record(&record, &GlobalDefaults::default());
    ensure!(code.is_empty(), "unexpected output:\n{code}");
    Ok(())
}

#[test]
fn construct_entries_follow_declaration_order() -> Result<()> {
    let record = record(
        r#"
        /// accessor:all(setter, set_prefix=Set)
        /// accessor:construct(prefix=Get)
        struct User {
            id: u64,
            name: String,
            #[accessor(construct = "SetAge(u8)")]
            age: u8,
        }
        "#,
    )?;
    let code = generate_record(&record, &GlobalDefaults::default());
    let calls: Vec<&str> = code
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("self.Set"))
        .collect();
    ensure!(
        calls
            == [
                "self.SetId(source.GetId());",
                "self.SetName(source.GetName());",
                "self.SetAge(source.GetAge());",
            ],
        "unexpected calls {calls:?}\n{code}"
    );
    ensure!(code.contains("pub trait UserFieldSource {"), "{code}");
    ensure!(code.contains("fn GetAge(&self) -> u8;"), "{code}");
    ensure!(!code.contains("fn SetAge(&mut self"), "bound setter emitted:\n{code}");
    ensure!(
        code.contains("pub fn construct(&mut self, source: &impl UserFieldSource) -> &mut Self {"),
        "{code}"
    );
    Ok(())
}

#[test]
fn empty_record_gets_trivial_initializer() -> Result<()> {
    let record = record(
        r#"
        /// accessor:construct()
        struct Empty {}
        "#,
    )?;
    let code = generate_record(&record, &GlobalDefaults::default());
    ensure!(code.contains("pub trait EmptyFieldSource {\n}"), "{code}");
    ensure!(
        code.contains("fn construct(&mut self, _source: &impl EmptyFieldSource) -> &mut Self {\n        self\n    }"),
        "{code}"
    );
    Ok(())
}

#[test]
fn field_name_beats_type_level_prefix() -> Result<()> {
    let record = record(
        r#"
        /// accessor:all(getter, get_prefix=Get)
        struct Account {
            #[accessor(getter = "Owner")]
            owner_name: String,
            balance: i64,
        }
        "#,
    )?;
    let code = generate_record(&record, &GlobalDefaults::default());
    ensure!(code.contains("pub fn Owner(&self) -> String"), "{code}");
    ensure!(!code.contains("GetOwnerName"), "{code}");
    ensure!(code.contains("pub fn GetBalance(&self) -> i64"), "{code}");
    Ok(())
}

#[test]
fn global_defaults_apply_to_undirected_records() -> Result<()> {
    let record = record("struct Point { x: i32, y: i32 }")?;
    let global = GlobalDefaults {
        getter: true,
        get_prefix: "Get".to_owned(),
        ..GlobalDefaults::default()
    };
    let code = generate_record(&record, &global);
    ensure!(code.contains("pub fn GetX(&self) -> i32"), "{code}");
    ensure!(code.contains("pub fn GetY(&self) -> i32"), "{code}");
    Ok(())
}

#[test]
fn generic_records_carry_parameters() -> Result<()> {
    let record = record(
        r#"
        /// accessor:all(getter, setter, set_prefix=Set)
        /// accessor:construct()
        struct Pair<K: Ord, V> where V: Clone {
            key: K,
            value: V,
        }
        "#,
    )?;
    let code = generate_record(&record, &GlobalDefaults::default());
    let squashed = code.replace(' ', "");
    ensure!(squashed.contains("traitPairFieldSource<K:Ord,V>whereV:Clone{"), "{code}");
    ensure!(squashed.contains("impl<K:Ord,V>Pair<K,V>whereV:Clone{"), "{code}");
    ensure!(squashed.contains("source:&implPairFieldSource<K,V>"), "{code}");
    Ok(())
}

#[test]
fn records_are_emitted_in_name_order() -> Result<()> {
    let records = scan_source(
        r#"
        /// accessor:all(getter)
        struct Zebra { stripes: u8 }
        /// accessor:all(getter)
        struct Aardvark { snout: u8 }
        struct Quiet { id: u8 }
        "#,
        &[],
    )?;
    let code = generate(&records, &GlobalDefaults::default());
    let zebra = code.find("impl Zebra").ok_or_else(|| anyhow!("Zebra missing:\n{code}"))?;
    let aardvark = code
        .find("impl Aardvark")
        .ok_or_else(|| anyhow!("Aardvark missing:\n{code}"))?;
    ensure!(aardvark < zebra, "records out of order:\n{code}");
    ensure!(!code.contains("Quiet"), "{code}");
    Ok(())
}

#[test]
fn generated_code_parses_as_rust() -> Result<()> {
    let records = scan_source(
        r#"
        /// accessor:all(getter, setter, set_prefix=Set, vis=priv)
        /// accessor:construct(name=fill_from, prefix=Src, source=ConfigSource)
        struct Config<'a> {
            #[accessor(getter = "Label,ref", vis = "pub(crate)")]
            label: &'a str,
            retries: u32,
        }
        "#,
        &[],
    )?;
    let code = generate(&records, &GlobalDefaults::default());
    let file = syn::parse_file(&code)?;
    ensure!(file.items.len() == 2, "expected trait and impl:\n{code}");
    ensure!(code.contains("trait ConfigSource<'a> {"), "{code}");
    ensure!(code.contains("    fn fill_from(&mut self, source: &impl ConfigSource<'a>)"), "{code}");
    ensure!(
        code.replace(' ', "").contains("pub(crate)fnLabel(&self)->&&'astr"),
        "{code}"
    );
    Ok(())
}
