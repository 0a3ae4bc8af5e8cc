#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        #[cfg(feature = "memory")]
        mod memory {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::VellumTest::new(
                        $crate::db::memory::SetupMemory::new()
                    );

                    test.run_test(|setup| async move {
                        super::$f(setup).await;
                    });
                }
            )*
        }

        #[cfg(feature = "sqlite")]
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    let mut test = $crate::VellumTest::new(
                        $crate::db::sqlite::SetupSqlite::new()
                    );

                    test.run_test(|setup| async move {
                        super::$f(setup).await;
                    });
                }
            )*
        }
    };
}
