use accessor_gen_macros::Accessors;

/// accessor:all(getter, vis=priv)
/// accessor:construct(prefix=Src)
#[derive(Accessors)]
struct View<'a> {
    #[accessor(getter = "Label,ref", setter = "*")]
    label: &'a str,
    #[accessor(getter = "-")]
    width: usize,
}

struct Fixed;

impl<'a> ViewFieldSource<'a> for Fixed {
    fn SrcLabel(&self) -> &'a str {
        "fixed"
    }
}

fn main() {
    let mut view = View { label: "", width: 4 };
    view.construct(&Fixed);
    assert_eq!(*view.Label(), "fixed");
    assert_eq!(view.width, 4);
}
