use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tabsync_menu::{resolve, CategoryTreeNode, MenuItem};

/// A forest of `roots` categories, each `fanout` wide and three levels deep.
fn forest(roots: usize, fanout: usize) -> Vec<CategoryTreeNode> {
    fn build(id: String, depth: usize, fanout: usize) -> CategoryTreeNode {
        let mut node = CategoryTreeNode::new(id.clone(), format!("Category {id}"), format!("c-{id}"));
        if depth < 3 {
            node.children = (0..fanout)
                .map(|i| build(format!("{id}.{i}"), depth + 1, fanout))
                .collect();
        }
        node
    }
    (0..roots).map(|i| build(i.to_string(), 1, fanout)).collect()
}

fn menu(roots: usize) -> Vec<MenuItem> {
    (0..roots)
        .map(|i| {
            let mut item = MenuItem::category(format!("m{i}"), i.to_string());
            item.include_children = i % 2 == 0;
            item
        })
        .chain(std::iter::once(MenuItem::link("blog", "Blog", "/blog")))
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for (roots, fanout) in [(10, 4), (50, 6), (200, 8)] {
        let tree = forest(roots, fanout);
        let items = menu(roots);
        let nodes = roots * (1 + fanout + fanout * fanout);
        group.throughput(Throughput::Elements(nodes as u64));

        group.bench_with_input(
            BenchmarkId::new("catalogue", nodes),
            &(items, tree),
            |b, (items, tree)| b.iter(|| black_box(resolve(items, tree))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
