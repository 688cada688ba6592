use criterion::{Criterion, black_box, criterion_group, criterion_main};
use snaptree_core::{ComparisonOptions, Engine, Recorder, equal};
use snaptree_fs::LocalFs;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn populate(root: &Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let dir = root.join(format!("dir-{}", d));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            fs::write(dir.join(format!("file-{}", f)), "content").unwrap();
        }
    }
}

fn equal_benchmark(c: &mut Criterion) {
    c.bench_function("equal (two files)", |b| {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let other = dir.path().join("b");
        fs::write(&a, "hello").unwrap();
        fs::write(&other, "hello").unwrap();
        let fs_impl = LocalFs::new();
        let options = ComparisonOptions::default();

        b.iter(|| {
            equal(&fs_impl, black_box(&[a.as_path(), other.as_path()]), &options).unwrap();
        })
    });
}

fn replace_benchmark(c: &mut Criterion) {
    // Steady state: destination already mirrors the source
    c.bench_function("replace (up to date, 20x20)", |b| {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("dest");
        populate(&src, 20, 20);
        let fs_impl = LocalFs::new();
        let options = ComparisonOptions::default().with_hardlink(false);
        let mut recorder = Recorder::new();
        Engine::new(&fs_impl, &options, &mut recorder)
            .replace(&src, &dest)
            .unwrap();

        b.iter(|| {
            let mut recorder = Recorder::new();
            Engine::new(&fs_impl, &options, &mut recorder)
                .replace(black_box(&src), black_box(&dest))
                .unwrap();
        })
    });
}

criterion_group!(benches, equal_benchmark, replace_benchmark);
criterion_main!(benches);
