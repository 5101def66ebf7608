use accessor_gen_macros::AccessorFields;

/// accessor:all(getter, get_prefix=Get)
#[derive(AccessorFields)]
pub struct User {
    #[accessor(setter = "*")]
    name: String,
    #[accessor(getter = "Tags", ref)]
    tags: Vec<String>,
}

#[allow(non_snake_case)]
impl User {
    pub fn GetName(&self) -> String {
        self.name.clone()
    }
}

fn main() {
    let user = User {
        name: "ada".to_owned(),
        tags: Vec::new(),
    };
    assert_eq!(user.GetName(), "ada");
    assert!(user.tags.is_empty());
}
