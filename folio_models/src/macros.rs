macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Display,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(::uuid::Uuid);

        impl $ident {
            pub fn generate() -> Self {
                Self::new(::uuid::Uuid::new_v4())
            }
        }
    };
}

pub(crate) use id;
